use models::{StoredSessionRecord, UserProfile};
use service::SessionRepository;
use tokio::sync::watch;

/// Home screen: shows the stored user and logs out.
pub struct HomeController {
    repo: SessionRepository,
}

impl HomeController {
    pub fn new(repo: SessionRepository) -> Self {
        Self { repo }
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.repo.current_user().await
    }

    /// Clears the stored session; storage errors are only logged.
    pub async fn logout(&self) {
        self.repo.logout().await;
    }

    /// Session changes made from any screen. Views watch this to leave home
    /// when the session disappears.
    pub fn session(&self) -> watch::Receiver<Option<StoredSessionRecord>> {
        self.repo.subscribe()
    }
}
