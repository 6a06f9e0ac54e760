//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol on top of the operation catalog.
//!
//! ## Tool Architecture
//!
//! Operations are defined in `domains/tools/definitions/` with one file per
//! operation and collected into a [`Catalog`] at startup. The catalog is then
//! frozen behind an `Arc` and shared by:
//! - the rmcp `ToolRouter` (STDIO/TCP transport), built in `domains/tools/router.rs`
//! - [`McpServer::list_tools`] / [`McpServer::call_tool`] (HTTP transport)
//!
//! **Adding a new operation does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::tool::{ToolCallContext, ToolRouter},
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use super::error;
use crate::domains::tools::{
    Catalog, Dispatcher, InvocationRequest, ToolError, build_catalog, build_tool_router,
    router::{failure_result, success_result, to_call_result, to_tool},
};

const INSTRUCTIONS: &str =
    "Calculator MCP server. Call add, subtract, multiply or divide with numeric arguments.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls through the shared [`Dispatcher`].
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Validates and runs operations from the published catalog.
    dispatcher: Dispatcher,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the built-in operations.
    ///
    /// Fails if the catalog cannot be built, in which case the process
    /// should not start.
    pub fn new(config: Config) -> error::Result<Self> {
        let catalog = build_catalog()?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create a server over an already built catalog.
    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        let dispatcher = Dispatcher::new(Arc::new(catalog));
        info!(
            "Catalog published with {} operations: {}",
            dispatcher.catalog().len(),
            dispatcher.catalog().names().join(", ")
        );

        Self {
            tool_router: build_tool_router::<Self>(dispatcher.clone()),
            config: Arc::new(config),
            dispatcher,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the dispatcher.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Server instructions sent to clients on initialize.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.dispatcher.catalog().manifest()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Handler failures are returned as an `isError` tool result; unknown
    /// operations and invalid arguments are returned as `Err`.
    pub async fn call_tool(
        &self,
        request: InvocationRequest,
    ) -> Result<CallToolResult, ToolError> {
        info!("Tool called: {}", request.operation);
        match self.dispatcher.dispatch(request) {
            Ok(value) => Ok(success_result(value)),
            Err(e) if e.is_handler_failure() => Ok(failure_result(&e)),
            Err(e) => Err(e),
        }
    }

    /// Protocol error for a tool name with no route, carrying the same
    /// structured failure the HTTP transport sends.
    fn unknown_route(&self, name: &str) -> Option<McpError> {
        if self.tool_router.has_route(name) {
            return None;
        }
        warn!("Unknown tool requested: {}", name);
        to_call_result(Err(ToolError::unknown_operation(name))).err()
    }
}

/// ServerHandler implementation routing tool calls through the catalog.
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(err) = self.unknown_route(&request.name) {
            return Err(err);
        }
        let ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(ctx).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.dispatcher.catalog().list().map(to_tool).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default()).unwrap()
    }

    fn request(name: &str, arguments: serde_json::Value) -> InvocationRequest {
        InvocationRequest {
            operation: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_server_identity() {
        let server = server();
        assert_eq!(server.name(), "calculator-mcp-server");
        assert_eq!(server.version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_list_tools() {
        let tools = server().list_tools();
        let names: Vec<_> = tools.iter().filter_map(|t| t["name"].as_str()).collect();
        assert_eq!(names, vec!["add", "subtract", "multiply", "divide"]);
        assert_eq!(
            tools[3]["inputSchema"]["required"],
            json!(["dividend", "divisor"])
        );
    }

    #[test]
    fn test_call_tool_success() {
        let result = tokio_test::block_on(server().call_tool(request("add", json!({"a": 2, "b": 3}))))
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["result"], 5.0);
    }

    #[test]
    fn test_call_tool_division_by_zero() {
        let result = tokio_test::block_on(
            server().call_tool(request("divide", json!({"dividend": 10, "divisor": 0}))),
        )
        .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content.unwrap()["kind"],
            "division_by_zero"
        );
    }

    #[test]
    fn test_call_tool_unknown() {
        let err = tokio_test::block_on(server().call_tool(request("noop", json!({})))).unwrap_err();
        assert_eq!(err, ToolError::unknown_operation("noop"));
    }

    #[test]
    fn test_call_tool_non_finite_result() {
        let server = server();

        let sum = tokio_test::block_on(server.call_tool(request("add", json!({"a": "inf", "b": 1}))))
            .unwrap();
        assert_eq!(sum.is_error, Some(false));
        assert!(sum.structured_content.is_none());
        assert_eq!(sum.content[0].as_text().unwrap().text, "inf");

        let product = tokio_test::block_on(
            server.call_tool(request("multiply", json!({"a": "NaN", "b": 2}))),
        )
        .unwrap();
        assert!(product.structured_content.is_none());
        assert_eq!(product.content[0].as_text().unwrap().text, "NaN");
    }

    #[test]
    fn test_unknown_route_carries_structured_failure() {
        let server = server();
        for name in ["add", "subtract", "multiply", "divide"] {
            assert!(server.unknown_route(name).is_none());
        }

        let err = server.unknown_route("noop").unwrap();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        let data = err.data.unwrap();
        assert_eq!(data["kind"], "unknown_operation");
        assert_eq!(data["operation"], "noop");
    }

    #[test]
    fn test_get_info_enables_tools_only() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.capabilities.prompts.is_none());
        assert_eq!(info.instructions.as_deref(), Some(INSTRUCTIONS));
    }
}
