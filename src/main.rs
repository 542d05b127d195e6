use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use dbgrant::api::{self, core::Endpoint};
use dbgrant::config::Config;
use dbgrant::core::EngineType;
use dbgrant::utils::logging;

#[derive(Parser)]
#[clap(version, author = "dbgrant Contributors")]
enum Cli {
    /// Start the privilege administration service
    Serve {
        #[clap(short, long, default_value = "config.toml")]
        config: String,
        /// Override the listen host from the config file
        #[clap(long)]
        host: Option<String>,
        /// Override the listen port from the config file
        #[clap(long)]
        port: Option<u16>,
    },
    /// Run a single endpoint locally and print the JSON response
    Call {
        /// Endpoint name, e.g. check_authority
        endpoint: String,
        /// JSON request body
        #[clap(short, long)]
        request: PathBuf,
        #[clap(short, long, default_value = "config.toml")]
        config: String,
    },
    /// Print the grantable privilege names for an engine
    Authorities {
        #[clap(short, long)]
        engine: String,
        /// Target object, `schema.table` selects object-level privileges
        #[clap(short, long, default_value = "")]
        table: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Serve { config, host, port } => {
            let mut config = Config::load_or_default(&config);
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            logging::init(&config.log).context("日志初始化失败")?;
            let outcome = api::start_service(config).await;
            logging::shutdown();
            outcome?;
        }
        Cli::Call {
            endpoint,
            request,
            config,
        } => {
            let config = Config::load_or_default(&config);
            let endpoint: Endpoint = endpoint.parse().map_err(|e: String| anyhow!(e))?;
            let content = fs::read_to_string(&request)
                .with_context(|| format!("无法读取请求文件 {}", request.display()))?;
            let body: serde_json::Value =
                serde_json::from_str(&content).context("请求文件不是有效的 JSON")?;

            logging::init(&config.log).context("日志初始化失败")?;
            let result = api::execute_call(&config, endpoint, body).await;
            logging::shutdown();

            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Cli::Authorities { engine, table } => {
            let engine: EngineType = engine.parse()?;
            for name in engine.dialect().authorities(&table) {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
