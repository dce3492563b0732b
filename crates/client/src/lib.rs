pub mod cli;
pub mod startup;

pub use cli::{Cli, Command, Report};
pub use startup::AppContext;

/// Build the app from `config` and run one command against it.
pub async fn run(config: configs::AppConfig, command: Command) -> anyhow::Result<Report> {
    let ctx = AppContext::build(&config).await?;
    cli::execute(&ctx, command).await
}
