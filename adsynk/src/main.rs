use clap::Parser;
use tracing::{debug, info, warn};

use adsynk::config::Config;

#[derive(Parser)]
#[command(version)]
struct Args {
    /// Set config file path
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let cfg = Config::parse(args.config);
    adsynk::log::set(format!("adsynk={},tower_http=warn", cfg.log.level));

    warn!("set log level : {}", cfg.log.level);
    debug!("config : {:?}", cfg);

    let listener = tokio::net::TcpListener::bind(cfg.http.listen)
        .await
        .unwrap();
    info!("Server listening on {}", listener.local_addr().unwrap());

    adsynk::serve(cfg, listener, shutdown_signal()).await;
    info!("Server shutdown");
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    debug!("Received stop signal");
}
