//! Tool Registry - the fixed list of operations this server exposes.
//!
//! When adding a new operation:
//! 1. Create the definition file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `all_operations()`

use super::catalog::{Catalog, OperationDescriptor};
use super::definitions::{AddTool, DivideTool, MultiplyTool, OperationDefinition, SubtractTool};
use super::error::ToolError;

/// Every operation descriptor, in registration order.
pub fn all_operations() -> Vec<OperationDescriptor> {
    vec![
        AddTool::descriptor(),
        SubtractTool::descriptor(),
        MultiplyTool::descriptor(),
        DivideTool::descriptor(),
    ]
}

/// Build the catalog from [`all_operations`].
///
/// Any registration failure is fatal: the server must not start with an
/// inconsistent catalog.
pub fn build_catalog() -> Result<Catalog, ToolError> {
    let mut catalog = Catalog::new();
    for descriptor in all_operations() {
        catalog.register(descriptor)?;
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_catalog() {
        let catalog = build_catalog().unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.names(), vec!["add", "subtract", "multiply", "divide"]);
    }

    #[test]
    fn test_descriptors_match_definitions() {
        let catalog = build_catalog().unwrap();

        let divide = catalog.lookup("divide").unwrap();
        assert_eq!(divide.description(), "Divide two numbers");
        let params: Vec<_> = divide
            .parameters()
            .iter()
            .map(|p| (p.name.as_str(), p.description.as_str(), p.required))
            .collect();
        assert_eq!(
            params,
            vec![("dividend", "Dividend", true), ("divisor", "Divisor", true)]
        );

        let add = catalog.lookup("add").unwrap();
        assert_eq!(add.description(), "Add two numbers");
        assert_eq!(add.parameters()[0].description, "First number");
        assert_eq!(add.parameters()[1].description, "Second number");
    }

    #[test]
    fn test_registering_defaults_twice_fails() {
        let mut catalog = build_catalog().unwrap();
        let err = catalog.register(AddTool::descriptor()).unwrap_err();
        assert_eq!(err, ToolError::duplicate_operation("add"));
        assert_eq!(catalog.len(), 4);
    }
}
