//! The same tools served over the Model Context Protocol.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool_handler, ServerHandler,
};

use crate::config::Config;
use crate::tools::{FetchUrl, FetchUrlParams, SaveFile, SaveFileParams};

#[derive(Debug, Clone)]
pub struct ToolboxServer {
    fetch: FetchUrl,
    save: SaveFile,
    pub tool_router: ToolRouter<Self>,
}

#[rmcp::tool_router]
impl ToolboxServer {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            fetch: FetchUrl::new(config)?,
            save: SaveFile::new(config),
            tool_router: Self::tool_router(),
        })
    }

    #[rmcp::tool(
        description = "Fetch a URL with an HTTP GET and return the response body as text"
    )]
    async fn fetch_url(
        &self,
        Parameters(FetchUrlParams { url }): Parameters<FetchUrlParams>,
    ) -> String {
        match self.fetch.fetch(&url).await {
            Ok(body) => body,
            Err(e) => format!("Error: {}", e),
        }
    }

    #[rmcp::tool(
        description = "Write text to a file, creating parent directories and replacing any existing file"
    )]
    async fn save_file(&self, Parameters(input): Parameters<SaveFileParams>) -> String {
        match self.save.save(&input.path, &input.content).await {
            Ok(msg) => msg,
            Err(e) => format!("Error: {}", e),
        }
    }
}

#[tool_handler]
impl ServerHandler for ToolboxServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Toolbox MCP Server - fetch_url retrieves a web page as text, \
                 save_file writes text to disk."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
