//! Presentation state for the auth flow.
//! - `state`: the shared `Idle → Loading → Success | Error` machine.
//! - `login` / `register` / `home`: one controller per screen.
//! - `navigation`: routes and back-stack rules between the screens.

pub mod home;
pub mod login;
pub mod navigation;
pub mod register;
pub mod state;

pub use home::HomeController;
pub use login::LoginController;
pub use navigation::{Navigator, Route};
pub use register::{RegisterController, RegisterForm};
pub use state::{ScreenMachine, ScreenState, Submission};
