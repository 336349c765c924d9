mod api;
mod blockchain;
mod config;
mod error;
mod network;
mod node;
mod transaction;

use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;
use std::io;

use api::AppState;
use config::NodeConfig;
use network::HttpChainSource;
use node::Node;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let node =
        Node::from_config(&config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    println!(
        "⛓️ Starting ledger node {} at http://{}:{}",
        config.node_address, config.host, config.port
    );
    info!(
        "difficulty={} peers={:?} reward_receiver={:?}",
        node.difficulty(),
        node.nodes(),
        config.reward_receiver
    );

    let state = web::Data::new(AppState::new(
        node,
        HttpChainSource::new(config.peer_timeout),
    ));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
