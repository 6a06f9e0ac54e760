//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are named, typed operations that MCP clients can discover and call.
//!
//! ## Architecture
//!
//! - `catalog.rs` - Operation descriptors and the read-only catalog
//! - `dispatcher.rs` - Argument validation and handler execution
//! - `definitions/` - Individual operation implementations (one file per operation)
//! - `registry.rs` - The fixed operation list and catalog construction
//! - `router.rs` - Adapter from the catalog to an rmcp ToolRouter
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Operation
//!
//! 1. Create a new file in `definitions/` implementing `OperationDefinition`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `all_operations()` in `registry.rs`
//!
//! **No need to modify `server.rs` or any transport!** Routes and the HTTP
//! listing are derived from the catalog.

pub mod catalog;
pub mod definitions;
pub mod dispatcher;
mod error;
pub mod registry;
pub mod router;

pub use catalog::{Catalog, Handler, HandlerResult, OperationDescriptor, ParameterSpec, ValueType};
pub use dispatcher::{
    Arguments, Dispatcher, InvocationRequest, InvocationResult, ResolvedArguments,
};
pub use error::{HandlerError, InvocationFailure, ToolError};
pub use registry::build_catalog;
pub use router::build_tool_router;
