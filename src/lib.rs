//! A stdio tool server for agent orchestrators.
//!
//! Requests arrive one JSON object per line on stdin, are routed by method
//! name to a [`registry::Tool`], and each produces exactly one JSON line on
//! stdout. The built-in tools are `fetch_url` and `save_file`.

pub mod config;
pub mod error;
pub mod mcp;
pub mod protocol;
pub mod registry;
pub mod tools;
pub mod transport;

pub use config::{Config, ErrorEncoding};
pub use error::{DecodeError, ToolError};
pub use protocol::{Request, Response};
pub use registry::{Tool, ToolRegistry};
pub use transport::Server;
