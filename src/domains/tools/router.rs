//! Tool Router - builds the rmcp ToolRouter from the catalog.
//!
//! Each catalog entry becomes one route. Routes share a single
//! [`Dispatcher`], so validation and error mapping are identical to the
//! HTTP transport.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter, schema_for_type},
    model::{CallToolResult, Content, Tool, ToolAnnotations},
};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::catalog::OperationDescriptor;
use super::dispatcher::{Arguments, Dispatcher, InvocationResult};
use super::error::ToolError;

/// Structured content of a successful call.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ArithmeticOutput {
    /// The computed value.
    pub result: f64,
}

/// Build the tool router with every operation in the dispatcher's catalog.
pub fn build_tool_router<S>(dispatcher: Dispatcher) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let catalog = dispatcher.catalog().clone();
    catalog
        .list()
        .fold(ToolRouter::new(), |router, descriptor| {
            router.with_route(create_route(descriptor, dispatcher.clone()))
        })
}

/// Create a Tool model for an operation (metadata).
pub fn to_tool(descriptor: &OperationDescriptor) -> Tool {
    Tool {
        name: descriptor.name().to_string().into(),
        description: Some(descriptor.description().to_string().into()),
        input_schema: Arc::new(descriptor.input_schema()),
        annotations: Some(
            ToolAnnotations::new()
                .read_only(true)
                .destructive(false)
                .idempotent(true)
                .open_world(false),
        ),
        output_schema: Some(Arc::new(schema_for_type::<ArithmeticOutput>())),
        icons: None,
        meta: None,
        title: None,
    }
}

/// Convert an invocation outcome into an MCP tool result.
///
/// Handler failures become `isError` results the model can read; argument
/// problems are protocol errors.
pub fn to_call_result(result: InvocationResult) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => Ok(success_result(value)),
        Err(e) if e.is_handler_failure() => Ok(failure_result(&e)),
        Err(e) => Err(McpError::invalid_params(
            e.to_string(),
            Some(json!(e.to_failure())),
        )),
    }
}

/// Text summary plus `{"result": value}` structured content.
///
/// JSON has no NaN or infinity, so non-finite results are sent as text only
/// and never as structured content that breaks the advertised output schema.
pub fn success_result(value: f64) -> CallToolResult {
    let structured_content = value
        .is_finite()
        .then(|| json!(ArithmeticOutput { result: value }));

    CallToolResult {
        content: vec![Content::text(value.to_string())],
        structured_content,
        is_error: Some(false),
        meta: None,
    }
}

/// Error result carrying the structured failure.
pub fn failure_result(error: &ToolError) -> CallToolResult {
    let failure = error.to_failure();
    CallToolResult {
        content: vec![Content::text(failure.message.clone())],
        structured_content: Some(json!(failure)),
        is_error: Some(true),
        meta: None,
    }
}

fn create_route<S>(descriptor: &OperationDescriptor, dispatcher: Dispatcher) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = descriptor.name().to_string();
    ToolRoute::new_dyn(to_tool(descriptor), move |ctx: ToolCallContext<'_, S>| {
        let arguments = Arguments::Named(ctx.arguments.clone().unwrap_or_default());
        let dispatcher = dispatcher.clone();
        let name = name.clone();
        async move {
            info!("Tool called: {}", name);
            to_call_result(dispatcher.invoke(&name, &arguments))
        }
        .boxed()
    })
}
