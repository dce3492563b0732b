use models::validation::validate_registration;
use service::SessionRepository;
use tokio::sync::watch;

use crate::state::{ScreenMachine, ScreenState, Submission};

const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";

/// Form input for the register screen
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: Option<String>,
}

/// State holder for the register screen
pub struct RegisterController {
    repo: SessionRepository,
    machine: ScreenMachine,
}

impl RegisterController {
    pub fn new(repo: SessionRepository) -> Self {
        Self { repo, machine: ScreenMachine::new("register") }
    }

    /// Checks name, email, password, length and confirmation in that order
    /// before any network call.
    pub fn submit(&self, form: &RegisterForm) -> Submission {
        let repo = self.repo.clone();
        let owned = form.clone();
        self.machine.submit(
            || validate_registration(&form.name, &form.email, &form.password, &form.confirm_password),
            move || async move {
                repo.register(&owned.name, &owned.email, &owned.password, owned.phone_number.as_deref()).await
            },
            REGISTER_FALLBACK,
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
}
