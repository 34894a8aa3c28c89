//! `extra-headers` command line tool.
//!
//! Sends requests through a header-injecting transport, parses header
//! strings, and watches a config file for header changes.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use clap::{Parser, Subcommand};
use http::{Method, Request, Response};

use extra_headers::config::watcher::ConfigWatcher;
use extra_headers::config::{load_config, HeaderInstaller};
use extra_headers::observability::logging::init_logging;
use extra_headers::transport::ReqwestTransport;
use extra_headers::{parse_headers_string, ExtraHeadersConfig, HeaderSet, HeaderStore, SharedTransport};

#[derive(Parser)]
#[command(name = "extra-headers")]
#[command(about = "Send HTTP requests with extra headers injected", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Extra header as "Key: Value" (or "K1: V1, K2: V2"); overrides configured headers.
    #[arg(short = 'H', long = "header", global = true)]
    headers: Vec<String>,

    /// Accept invalid TLS certificates.
    #[arg(long, global = true)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one request and print the response
    Send {
        url: String,

        #[arg(short = 'X', long, default_value = "GET")]
        method: String,

        /// Request body.
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Print the headers a header string parses to, as JSON
    Parse { spec: String },
    /// Apply the config file's headers and re-apply them on every change
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ExtraHeadersConfig::default(),
    };
    if cli.insecure {
        config.transport.insecure = true;
    }

    init_logging(&config.observability)?;

    match cli.command {
        Commands::Parse { spec } => {
            let headers = parse_headers_string(&spec);
            println!("{}", serde_json::to_string_pretty(&headers)?);
        }
        Commands::Send { url, method, data } => {
            let installer = installer(&config, &cli.headers)?;
            let client = installer.install(&config)?;

            let request = Request::builder()
                .method(Method::from_bytes(method.as_bytes())?)
                .uri(url)
                .body(Bytes::from(data.unwrap_or_default()))?;
            let response = client.send(&request).await?;
            print_response(&response);
        }
        Commands::Watch => {
            let Some(path) = cli.config else {
                return Err("watch requires --config".into());
            };

            let installer = installer(&config, &cli.headers)?;
            installer.install(&config)?;
            let store = installer.store().clone();

            let (_watcher, updates) = ConfigWatcher::new(&path).spawn()?;
            let reloads = tokio::spawn(installer.run(updates));

            tokio::signal::ctrl_c().await?;
            reloads.abort();
            tracing::info!(headers = ?store.get(), "Stopped watching");
        }
    }

    Ok(())
}

/// Installer over a fresh store and the configured base transport, with the
/// `-H` flags laid over every configured set.
fn installer(
    config: &ExtraHeadersConfig,
    flags: &[String],
) -> Result<HeaderInstaller, Box<dyn std::error::Error>> {
    let overrides: HeaderSet = flags.iter().flat_map(|flag| parse_headers_string(flag)).collect();
    let base: SharedTransport = Arc::new(ReqwestTransport::new(&config.transport)?);
    Ok(HeaderInstaller::new(Arc::new(HeaderStore::new()), base).with_overrides(overrides))
}

fn print_response(response: &Response<Bytes>) {
    println!("{:?} {}", response.version(), response.status());
    for (name, value) in response.headers() {
        println!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
    }
    println!();
    println!("{}", String::from_utf8_lossy(response.body()));
}
