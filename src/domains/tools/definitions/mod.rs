//! Operation definitions module.
//!
//! Each operation is defined in its own file with:
//! - Metadata (name, description, parameters)
//! - A pure handler over resolved arguments
//!
//! ## Adding a New Operation
//!
//! 1. Create a new file (e.g., `arithmetic/power.rs`)
//! 2. Implement the `OperationDefinition` trait
//! 3. Export it here
//! 4. Register it in `registry.rs`

pub mod arithmetic;

pub use arithmetic::{AddTool, DivideTool, MultiplyTool, SubtractTool};

use super::catalog::{HandlerResult, OperationDescriptor, ParameterSpec};
use super::dispatcher::ResolvedArguments;

/// Trait for operation definitions.
///
/// Each operation implements this trait to provide its metadata and handler.
pub trait OperationDefinition {
    /// The unique name of the operation.
    const NAME: &'static str;

    /// A description of what the operation does.
    const DESCRIPTION: &'static str;

    /// Parameters in declaration order.
    fn parameters() -> Vec<ParameterSpec>;

    /// Run the operation on validated arguments.
    fn handle(args: &ResolvedArguments) -> HandlerResult;

    /// Build the catalog descriptor for this operation.
    fn descriptor() -> OperationDescriptor {
        OperationDescriptor::new(
            Self::NAME,
            Self::DESCRIPTION,
            Self::parameters(),
            Self::handle,
        )
    }
}
