use dotenv::dotenv;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::FmtSubscriber;

use crate::{
    client::trivia_client::TriviaClient, config::config::CONFIG, game::controller::GameController,
    ui::console::ConsoleUi,
};

mod client;
mod config;
mod game;
mod ui;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() {
    // Initialize .env
    dotenv().ok();

    // Initialize logging, stderr so log lines never mix into the rendered views
    let subscriber = FmtSubscriber::builder()
        .with_max_level(LevelFilter::INFO)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global tracing");

    // Initialize the controller with its collaborators
    let trivia_client = TriviaClient::new(&CONFIG.api.base_url);
    let console = ConsoleUi::new();
    let mut controller = GameController::new(trivia_client, console);

    info!("Trivia duel starting against {}", CONFIG.api.base_url);

    if let Err(e) = ui::console::run(&mut controller).await {
        error!("Console loop failed: {}", e);
    }
}
