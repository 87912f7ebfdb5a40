use clap::Parser;
use ferrous_split_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-split")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous Split - DNS forwarder with split-horizon bypass for private zones")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Domain answered by the bypass resolver (repeatable, `*.` prefix allowed)
    #[arg(long = "bypass-domain", value_name = "DOMAIN")]
    bypass_domains: Vec<String>,

    /// Bypass resolver address; discovered from resolv.conf when omitted
    #[arg(long, value_name = "IP")]
    bypass_resolver: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        bypass_domains: cli.bypass_domains.clone(),
        bypass_resolver: cli.bypass_resolver.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ferrous Split v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;

    let dns_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let server = tokio::spawn(server::start_dns_server(
        dns_addr,
        dns_services.handler.clone(),
    ));

    tokio::select! {
        result = server => {
            match result {
                Ok(Err(e)) => error!(error = %e, "DNS server error"),
                Err(e) => error!(error = %e, "DNS server task failed"),
                Ok(Ok(())) => {}
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    dns_services.stop();

    info!("Server shutdown complete");
    Ok(())
}
