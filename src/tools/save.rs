//! `save_file`: write UTF-8 text to disk, creating parent directories.
//!
//! Writes go to a temporary file beside the target which is then renamed
//! over it, so a failed write never leaves a truncated file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rmcp::schemars;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::error::ToolError;
use crate::registry::Tool;

use super::parse_params;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveFileParams {
    #[schemars(
        description = "Path of the file to write; relative paths resolve against the save directory"
    )]
    pub path: String,
    #[schemars(description = "Text content to write; replaces any existing file")]
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct SaveFile {
    base_dir: Option<PathBuf>,
}

impl SaveFile {
    pub const NAME: &'static str = "save_file";

    pub fn new(config: &Config) -> Self {
        Self {
            base_dir: config.save_dir.clone(),
        }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub async fn save(&self, path: &str, content: &str) -> Result<String, ToolError> {
        if path.is_empty() {
            return Err(ToolError::InvalidParams("path must not be empty".into()));
        }
        let target = self.resolve(path);
        let bytes = content.as_bytes().to_vec();
        let save_err = |source: io::Error| ToolError::Save {
            path: path.to_string(),
            source,
        };

        let written =
            tokio::task::spawn_blocking(move || write_atomic(&target, &bytes).map(|()| target))
                .await
                .map_err(|e| save_err(io::Error::other(e)))?
                .map_err(save_err)?;

        tracing::debug!(path = %written.display(), bytes = content.len(), "saved file");
        Ok(format!("File saved: {path}"))
    }
}

fn write_atomic(target: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_permissions(target_permissions(target, tmp.as_file())?)?;
    tmp.persist(target).map_err(|e| e.error)?;
    Ok(())
}

/// Keep an existing file's permissions; new files get the usual `0644`.
fn target_permissions(target: &Path, tmp: &fs::File) -> io::Result<fs::Permissions> {
    if let Ok(meta) = fs::metadata(target) {
        return Ok(meta.permissions());
    }
    #[allow(unused_mut)]
    let mut perms = tmp.metadata()?.permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(0o644);
    }
    Ok(perms)
}

#[async_trait::async_trait]
impl Tool for SaveFile {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn call(&self, params: Value) -> Result<String, ToolError> {
        let SaveFileParams { path, content } = parse_params(params)?;
        self.save(&path, &content).await
    }
}
