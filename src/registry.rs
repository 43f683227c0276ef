//! Tool registry: maps method names to handlers.

use std::collections::HashMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;

use crate::error::ToolError;

/// A named operation the server exposes as a method.
#[async_trait::async_trait]
pub trait Tool: Send + Sync + 'static {
    /// Method name, matched exactly against the request's `method`.
    fn name(&self) -> &'static str;

    async fn call(&self, params: Value) -> Result<String, ToolError>;
}

/// Method table, built once at startup and never mutated afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name. A later registration with the same name wins.
    pub fn register<T: Tool>(&mut self, tool: T) -> &mut Self {
        self.tools.insert(tool.name(), Arc::new(tool));
        self
    }

    pub fn get(&self, method: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(method).cloned()
    }

    /// All registered method names (sorted).
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Run the handler for `method`.
    ///
    /// An absent or unknown method is not a failure: the outcome is a message
    /// naming the method. A panicking handler becomes [`ToolError::Panicked`].
    pub async fn dispatch(&self, method: Option<&str>, params: Value) -> Result<String, ToolError> {
        let Some(tool) = method.and_then(|m| self.get(m)) else {
            let name = method.unwrap_or("null");
            tracing::warn!(method = name, "unsupported method");
            return Ok(unsupported_method(name));
        };

        match AssertUnwindSafe(tool.call(params)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::error!(method = tool.name(), "tool panicked");
                Err(ToolError::Panicked(tool.name().to_string()))
            }
        }
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

pub fn unsupported_method(name: &str) -> String {
    format!("Method {name} not supported.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait::async_trait]
    impl Tool for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn call(&self, params: Value) -> Result<String, ToolError> {
            Ok(params.to_string())
        }
    }

    struct Boom;

    #[async_trait::async_trait]
    impl Tool for Boom {
        fn name(&self) -> &'static str {
            "boom"
        }

        async fn call(&self, _params: Value) -> Result<String, ToolError> {
            panic!("intentional panic");
        }
    }

    fn registry() -> ToolRegistry {
        let mut reg = ToolRegistry::new();
        reg.register(Echo).register(Boom);
        reg
    }

    #[tokio::test]
    async fn routes_by_exact_name() {
        let reg = registry();
        let out = reg.dispatch(Some("echo"), json!({"a": 1})).await.unwrap();
        assert_eq!(out, r#"{"a":1}"#);
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() {
        let reg = registry();
        let out = reg.dispatch(Some("Echo"), json!({})).await.unwrap();
        assert_eq!(out, "Method Echo not supported.");
    }

    #[tokio::test]
    async fn unknown_and_missing_methods_are_reported() {
        let reg = registry();
        let out = reg.dispatch(Some("does_not_exist"), json!({})).await.unwrap();
        assert!(out.contains("does_not_exist"));

        let out = reg.dispatch(None, json!({})).await.unwrap();
        assert_eq!(out, "Method null not supported.");
    }

    #[tokio::test]
    async fn panicking_tool_becomes_error() {
        let reg = registry();
        let err = reg.dispatch(Some("boom"), json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::Panicked(ref name) if name == "boom"));
    }

    #[test]
    fn tool_names_sorted() {
        assert_eq!(registry().tool_names(), vec!["boom", "echo"]);
    }
}
