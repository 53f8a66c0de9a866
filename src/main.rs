mod config;
mod database;
mod error;
mod model;
mod router;
mod routes;
mod server;
mod state;

use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    server::run(config::Config::parse()).await
}
