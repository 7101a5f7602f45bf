use async_std::task;

use crumbs::config::{ServerConfig, set_config};
use crumbs::net::server::Server;

const DEFAULT_CONFIG_PATH: &str = "crumbs.toml";

fn main() -> std::io::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    set_config(ServerConfig::load(&path)).map_err(std::io::Error::other)?;

    let server = Server::new().map_err(std::io::Error::other)?;
    task::block_on(server.run())
}
