use anyhow::Result;
use clap::Args;

use solsight::config::Config;
use solsight::server::Server;

#[derive(Args)]
pub struct ServeArgs {
    /// Bind address (overrides config)
    #[arg(long)]
    pub bind: Option<String>,

    /// Port (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> Result<()> {
    let mut config = Config::load(config_path)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let server = Server::new(&config)?;
    server.run().await
}
