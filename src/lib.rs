//! Calculator MCP Server Library
//!
//! This crate exposes a small set of named, typed arithmetic operations to
//! MCP clients through an explicit operation catalog instead of a
//! hand-written request router.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The operation catalog, the dispatcher and the arithmetic operations
//!
//! # Example
//!
//! ```rust
//! use calculator_mcp_server::domains::tools::{Arguments, Dispatcher, build_catalog};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(build_catalog().unwrap());
//! let dispatcher = Dispatcher::new(catalog);
//!
//! let args = Arguments::from_json(serde_json::json!({"a": 2, "b": 3})).unwrap();
//! assert_eq!(dispatcher.invoke("add", &args), Ok(5.0));
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
