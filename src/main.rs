use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use roadcheck::backend::BackendClient;
use roadcheck::{Game, ProgressTarget};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file describing the scenario to play
    #[arg(short, long)]
    scenario: PathBuf,

    /// Backend base URL for progress sync (falls back to ROADCHECK_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Category the scenario belongs to
    #[arg(long, default_value_t = 1)]
    category: u32,

    /// Phase the scenario belongs to
    #[arg(long, default_value_t = 1)]
    phase: u32,

    /// Scenario index recorded on completion
    #[arg(long, default_value_t = 1)]
    next_index: usize,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();

    let args = Args::parse();
    let backend_url = args
        .backend_url
        .or_else(|| std::env::var("ROADCHECK_BACKEND_URL").ok());

    let scenario = match roadcheck::load_scenario_from_json(&args.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.scenario.display(), e);
            std::process::exit(1);
        }
    };
    log::info!(
        "loaded scenario '{}' with {} questions",
        scenario.title,
        scenario.questions.len()
    );

    let game = match backend_url {
        Some(url) => match BackendClient::new(url) {
            Ok(backend) => {
                let target = ProgressTarget {
                    user_id: Uuid::new_v4(),
                    category_id: args.category,
                    phase: args.phase,
                    next_scenario_index: args.next_index,
                };
                Game::with_backend(scenario, Arc::new(backend), target)
            }
            Err(e) => {
                // Play offline rather than refusing to start.
                log::warn!("backend unavailable, playing offline: {}", e);
                Game::new(scenario)
            }
        },
        None => Game::new(scenario),
    };

    if let Err(e) = game.run().await {
        eprintln!("Error running game: {}", e);
        std::process::exit(1);
    }
}
