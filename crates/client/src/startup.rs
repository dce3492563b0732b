use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use configs::AppConfig;
use gateway::{AuthGateway, GatewayConfig, HttpAuthGateway};
use screens::{HomeController, LoginController, Navigator, RegisterController};
use service::{runtime, CredentialStore, FileCredentialStore, SessionRepository};
use tracing::info;

/// Everything the screens need, wired once at startup.
pub struct AppContext {
    pub repo: SessionRepository,
    pub login: LoginController,
    pub register: RegisterController,
    pub home: HomeController,
}

impl AppContext {
    /// Prepare the data directory, then build the HTTP gateway and the file store.
    pub async fn build(config: &AppConfig) -> anyhow::Result<Self> {
        runtime::ensure_env(Path::new(&config.storage.data_dir)).await?;

        let gateway_cfg = GatewayConfig::from(&config.api);
        let gateway = HttpAuthGateway::new(&gateway_cfg).context("build auth gateway")?;
        info!(base_url = %gateway.base_url(), "auth gateway ready");

        let store_path = config.storage.file_path();
        let store = FileCredentialStore::open(&store_path)
            .await
            .with_context(|| format!("open credential store {}", store_path.display()))?;

        Ok(Self::with_parts(Arc::new(gateway), Arc::new(store)))
    }

    pub fn with_parts(gateway: Arc<dyn AuthGateway>, store: Arc<dyn CredentialStore>) -> Self {
        let repo = SessionRepository::new(gateway, store);
        Self {
            login: LoginController::new(repo.clone()),
            register: RegisterController::new(repo.clone()),
            home: HomeController::new(repo.clone()),
            repo,
        }
    }

    /// Back stack for this launch: home when a session is stored.
    pub async fn navigator(&self) -> Navigator {
        Navigator::start(self.repo.is_logged_in().await)
    }
}
