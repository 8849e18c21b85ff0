//! Admin command-line interface.
//!
//! The administrative surface of the store: catalog, banner and order
//! management behind an admin login.

use clap::{Parser, Subcommand};
use jiff::Timestamp;

use tokri_app::{auth::AdminSession, config::AppConfig, context::AppContext};

mod banner;
mod order;
mod product;
mod session;

#[derive(Debug, Parser)]
#[command(name = "tokri-app", about = "Tokri storefront admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in as the store admin
    Login(session::LoginArgs),

    /// Drop the current admin session
    Logout,

    /// Manage the product catalog
    Product(product::ProductCommand),

    /// Manage storefront banners
    Banner(banner::BannerCommand),

    /// Inspect and update orders
    Order(order::OrderCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let app = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to initialize: {error}"))?;

        match self.command {
            Commands::Login(args) => session::login(&app, args).await,
            Commands::Logout => session::logout(&app),
            Commands::Product(command) => product::run(&app, command).await,
            Commands::Banner(command) => banner::run(&app, command).await,
            Commands::Order(command) => order::run(&app, command).await,
        }
    }
}

/// Admin commands that change or expose store data require a live session.
pub(crate) fn require_session(app: &AppContext) -> Result<AdminSession, String> {
    app.auth
        .current_session(Timestamp::now())
        .map_err(|error| format!("failed to read session: {error}"))?
        .ok_or_else(|| "not logged in; run `tokri-app login` first".to_string())
}
