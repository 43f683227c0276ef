use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::EnvFilter;

use toolbox_mcp::config::ConfigArgs;
use toolbox_mcp::mcp::ToolboxServer;
use toolbox_mcp::tools::{default_registry, FetchUrl, SaveFile};
use toolbox_mcp::Server;

#[derive(Parser)]
#[command(
    name = "toolbox-mcp",
    version,
    about = "Line-delimited JSON-RPC tool server (fetch_url, save_file)"
)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the tools over the Model Context Protocol instead of plain JSON-RPC lines
    Mcp,
    /// Fetch one URL and print the body
    #[command(name = "fetch_url", visible_alias = "fetch-url")]
    FetchUrl { url: String },
    /// Save one file and print the confirmation
    #[command(name = "save_file", visible_alias = "save-file")]
    SaveFile {
        path: String,
        #[arg(default_value = "")]
        content: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // stdout carries protocol lines only
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("toolbox_mcp=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.into_config()?;
    tracing::debug!(?config, "configuration loaded");

    let outcome = match cli.command {
        None => {
            let registry = default_registry(&config).context("build HTTP client")?;
            Server::new(registry, config.error_encoding)
                .serve_stdio()
                .await
                .context("stdio transport failed")?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::Mcp) => {
            let server = ToolboxServer::new(&config).context("build HTTP client")?;
            let service = server
                .serve(stdio())
                .await
                .map_err(|e| anyhow::anyhow!("MCP initialization failed: {e}"))?;
            service.waiting().await?;
            return Ok(ExitCode::SUCCESS);
        }
        Some(Command::FetchUrl { url }) => {
            let tool = FetchUrl::new(&config).context("build HTTP client")?;
            tool.fetch(&url).await
        }
        Some(Command::SaveFile { path, content }) => {
            SaveFile::new(&config).save(&path, &content).await
        }
    };

    match outcome {
        Ok(text) => {
            println!("{text}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("Error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
