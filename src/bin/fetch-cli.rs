use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use origin_gateway::config::{load_config, GatewayConfig};
use origin_gateway::observability::logging;
use origin_gateway::{GatewayError, ProxyGateway};

#[derive(Parser)]
#[command(name = "fetch-cli")]
#[command(about = "Fetch a remote URL through the validated gateway", long_about = None)]
struct Cli {
    /// URL to fetch
    url: String,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Admit URLs resolving to private/loopback addresses
    #[arg(long)]
    allow_private: bool,

    /// Connection-phase timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Maximum redirects to follow
    #[arg(long)]
    max_redirects: Option<u32>,

    /// Write the body to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print classified errors as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init("origin_gateway=info");

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => GatewayConfig::default(),
    };

    if cli.allow_private {
        config.allow_private_hosts = true;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.timeout_ms = timeout_ms;
    }
    if let Some(max_redirects) = cli.max_redirects {
        config.max_redirects = max_redirects;
    }

    let gateway = match ProxyGateway::new(config) {
        Ok(gateway) => gateway,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut stream = match gateway.fetch(&cli.url).await {
        Ok(stream) => stream,
        Err(err) => {
            report_error(&err, cli.json);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        status = stream.status().as_u16(),
        content_type = stream.content_type().unwrap_or("unknown"),
        "response received"
    );

    let mut sink: Box<dyn tokio::io::AsyncWrite + Unpin> = match &cli.output {
        Some(path) => match tokio::fs::File::create(path).await {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("Error: cannot create {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(tokio::io::stdout()),
    };

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                if let Err(err) = sink.write_all(&bytes).await {
                    eprintln!("Error: write failed: {}", err);
                    return ExitCode::FAILURE;
                }
            }
            Err(err) => {
                report_error(&gateway.classify_stream_error(&err), cli.json);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(err) = sink.flush().await {
        eprintln!("Error: write failed: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn report_error(err: &GatewayError, json: bool) {
    if json {
        let payload = err.to_classified();
        match serde_json::to_string_pretty(&payload) {
            Ok(rendered) => eprintln!("{}", rendered),
            Err(_) => eprintln!("Error: HTTP {}: {}", payload.http_status, payload.message),
        }
    } else {
        eprintln!("Error: HTTP {}: {}", err.status().as_u16(), err);
    }
}
