use models::validation::validate_login;
use service::SessionRepository;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::state::{ScreenMachine, ScreenState, Submission};

const LOGIN_FALLBACK: &str = "Login failed. Please try again.";

/// State holder for the login screen
pub struct LoginController {
    repo: SessionRepository,
    machine: ScreenMachine,
}

impl LoginController {
    pub fn new(repo: SessionRepository) -> Self {
        Self { repo, machine: ScreenMachine::new("login") }
    }

    /// Blank email or password fails locally. Ignored while a login is in flight.
    pub fn submit(&self, email: &str, password: &str) -> Submission {
        let repo = self.repo.clone();
        let (owned_email, owned_password) = (email.to_owned(), password.to_owned());
        self.machine.submit(
            || validate_login(email, password),
            move || async move { repo.login(&owned_email, &owned_password).await },
            LOGIN_FALLBACK,
        )
    }

    pub fn reset(&self) {
        self.machine.reset();
    }

    pub fn state(&self) -> watch::Receiver<ScreenState> {
        self.machine.state()
    }

    pub fn current(&self) -> ScreenState {
        self.machine.current()
    }

    /// Run exactly one of the continuations depending on whether a session is
    /// stored. The screen state is not touched.
    pub fn check_login_status<L, N>(&self, on_logged_in: L, on_not_logged_in: N) -> JoinHandle<()>
    where
        L: FnOnce() + Send + 'static,
        N: FnOnce() + Send + 'static,
    {
        let repo = self.repo.clone();
        tokio::spawn(async move {
            let logged_in = repo.is_logged_in().await;
            debug!(logged_in, "login status checked");
            if logged_in {
                on_logged_in()
            } else {
                on_not_logged_in()
            }
        })
    }
}
