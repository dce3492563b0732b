//! Command line front end: each command drives the same controllers a screen would.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use configs::AppConfig;
use screens::{RegisterForm, Route, ScreenState};
use tracing::info;

use crate::startup::AppContext;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Sports Chaos account client")]
pub struct Cli {
    /// Config file (default: $CONFIG_PATH or config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Sign in and store the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and store the session
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm_password: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored user
    Status,
    /// Check the stored token with the server
    Validate,
}

impl Cli {
    /// Config from `--config` when given, otherwise the default lookup.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let path = path.to_string_lossy();
                configs::load_from_file(&path).with_context(|| format!("load config {path}"))?
            }
            None => configs::load_default()?,
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }
}

/// What a command ended with: the screen the user would be on and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub success: bool,
    pub route: Route,
    pub message: String,
}

impl Report {
    fn ok(route: Route, message: impl Into<String>) -> Self {
        Self { success: true, route, message: message.into() }
    }

    fn failed(route: Route, message: impl Into<String>) -> Self {
        Self { success: false, route, message: message.into() }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.route, self.message)
    }
}

pub async fn execute(ctx: &AppContext, command: Command) -> anyhow::Result<Report> {
    let mut nav = ctx.navigator().await;
    let report = match command {
        Command::Login { email, password } => {
            ctx.login.submit(&email, &password).finish().await;
            finish_auth(&mut nav, ctx.login.current(), "logged in")
        }
        Command::Register { name, email, password, confirm_password, phone } => {
            nav.on_logged_out();
            nav.to_register();
            let form = RegisterForm {
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                name,
                email,
                password,
                phone_number: phone,
            };
            ctx.register.submit(&form).finish().await;
            finish_auth(&mut nav, ctx.register.current(), "registered")
        }
        Command::Logout => {
            ctx.home.logout().await;
            nav.on_logged_out();
            if ctx.repo.is_logged_in().await {
                Report::failed(nav.current(), "logout could not clear the stored session")
            } else {
                Report::ok(nav.current(), "logged out")
            }
        }
        Command::Status => match ctx.home.profile().await {
            Some(user) => Report::ok(
                nav.current(),
                format!("logged in as {} <{}> (id {}, role {})", user.name, user.email, user.user_id, user.role),
            ),
            None => Report::ok(nav.current(), "not logged in"),
        },
        Command::Validate => match ctx.repo.validate_session().await {
            Ok(session) => Report::ok(nav.current(), format!("session valid for {}", session.email())),
            Err(e) => Report::failed(nav.current(), e.to_string()),
        },
    };
    info!(success = report.success, route = %report.route, "command finished");
    Ok(report)
}

fn finish_auth(nav: &mut screens::Navigator, state: ScreenState, verb: &str) -> Report {
    match state {
        ScreenState::Success(session) => {
            nav.on_authenticated();
            Report::ok(nav.current(), format!("{verb} as {} (id {})", session.email(), session.user_id()))
        }
        ScreenState::Error(message) => Report::failed(nav.current(), message),
        ScreenState::Idle | ScreenState::Loading => Report::failed(nav.current(), "no result"),
    }
}
