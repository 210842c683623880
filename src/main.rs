mod api;
mod cli;
mod countdown;
mod models;
mod normalize;
mod utils;
mod views;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use cli::{Cli, Command};
use utils::state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let state = AppState::init();
    info!(base = %state.config.api_base_url, season = state.config.season_year, "client initialized");

    let outcome = match cli.command {
        Command::Next { session } => views::next::run(&state, session).await,
        Command::Last => views::last::run(&state).await,
        Command::Season { year, round } => views::season::run(&state, year, round).await,
        Command::Standings { constructors } => views::standings::run(&state, constructors).await,
    };

    if outcome.is_err() {
        std::process::exit(1);
    }
}

fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::WARN,
    };

    let log_filter = filter::Targets::new()
        .with_target(env!("CARGO_PKG_NAME"), level)
        .with_default(Level::WARN);

    Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(log_filter)
        .init();
}
