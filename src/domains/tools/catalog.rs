//! Operation catalog - the immutable set of operations a server exposes.
//!
//! A [`Catalog`] is filled once during startup through [`Catalog::register`]
//! and then shared read-only (usually behind an `Arc`) with every transport.
//! Registration order is preserved for discovery.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::slice;
use tracing::info;

use super::dispatcher::ResolvedArguments;
use super::error::{HandlerError, ToolError};

/// Result returned by an operation handler.
pub type HandlerResult = Result<f64, HandlerError>;

/// A pure function from resolved arguments to a number.
///
/// Plain function pointers keep handlers free of captured state.
pub type Handler = fn(&ResolvedArguments) -> HandlerResult;

/// The value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// IEEE-754 double precision number.
    Number,
}

impl ValueType {
    /// JSON Schema type name for this value type.
    pub fn schema_type(self) -> &'static str {
        match self {
            Self::Number => "number",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_type())
    }
}

/// Declaration of a single named parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    /// Parameter name, unique within its operation.
    pub name: String,

    /// Human readable description shown during discovery.
    pub description: String,

    /// Whether a value must be supplied.
    pub required: bool,

    /// Declared value type.
    pub value_type: ValueType,
}

impl ParameterSpec {
    /// A required number parameter.
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            value_type: ValueType::Number,
        }
    }

    /// An optional number parameter.
    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, description)
        }
    }

    fn schema(&self) -> Value {
        json!({
            "type": self.value_type.schema_type(),
            "description": self.description,
        })
    }
}

/// Everything the server knows about one operation.
#[derive(Clone)]
pub struct OperationDescriptor {
    name: String,
    description: String,
    parameters: Vec<ParameterSpec>,
    handler: Handler,
}

impl OperationDescriptor {
    /// Create a descriptor. Parameter order is the declaration order.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Vec<ParameterSpec>,
        handler: Handler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    pub fn handler(&self) -> Handler {
        self.handler
    }

    /// JSON Schema object describing the operation's input.
    pub fn input_schema(&self) -> Map<String, Value> {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.schema()))
            .collect();

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(required));
        schema
    }

    /// Discovery entry in MCP tool listing format.
    pub fn manifest_entry(&self) -> Value {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
    }

    fn duplicate_parameter(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.parameters
            .iter()
            .map(|p| p.name.as_str())
            .find(|name| !seen.insert(*name))
    }
}

impl fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Mapping from operation name to descriptor, in registration order.
#[derive(Debug, Default)]
pub struct Catalog {
    operations: Vec<OperationDescriptor>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an operation.
    ///
    /// Fails without modifying the catalog when the name is already taken
    /// or the descriptor declares the same parameter twice.
    pub fn register(&mut self, descriptor: OperationDescriptor) -> Result<(), ToolError> {
        if self.index.contains_key(descriptor.name()) {
            return Err(ToolError::duplicate_operation(descriptor.name()));
        }

        if let Some(parameter) = descriptor.duplicate_parameter() {
            return Err(ToolError::duplicate_parameter(descriptor.name(), parameter));
        }

        info!(
            "Registering operation: {} ({} parameters)",
            descriptor.name(),
            descriptor.parameters().len()
        );

        self.index
            .insert(descriptor.name().to_string(), self.operations.len());
        self.operations.push(descriptor);
        Ok(())
    }

    /// Find an operation by name.
    pub fn lookup(&self, name: &str) -> Result<&OperationDescriptor, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.operations[i])
            .ok_or_else(|| ToolError::unknown_operation(name))
    }

    /// Iterate over all operations in registration order.
    ///
    /// The iterator is `Clone`, so a listing can be restarted at any point.
    pub fn list(&self) -> slice::Iter<'_, OperationDescriptor> {
        self.operations.iter()
    }

    /// Operation names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.list().map(OperationDescriptor::name).collect()
    }

    /// Discovery manifest for every operation.
    pub fn manifest(&self) -> Vec<Value> {
        self.list().map(OperationDescriptor::manifest_entry).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(args: &ResolvedArguments) -> HandlerResult {
        args.required(0)
    }

    fn negate(args: &ResolvedArguments) -> HandlerResult {
        Ok(-args.required(0)?)
    }

    fn descriptor(name: &str, handler: Handler) -> OperationDescriptor {
        OperationDescriptor::new(
            name,
            format!("{name} operation"),
            vec![
                ParameterSpec::required("x", "Input"),
                ParameterSpec::optional("scale", "Optional scale"),
            ],
            handler,
        )
    }

    #[test]
    fn test_lookup_returns_registered_descriptor() {
        let mut catalog = Catalog::new();
        catalog.register(descriptor("identity", first)).unwrap();

        let found = catalog.lookup("identity").unwrap();
        assert_eq!(found.name(), "identity");
        assert_eq!(found.description(), "identity operation");
        assert_eq!(
            found.parameters(),
            &[
                ParameterSpec::required("x", "Input"),
                ParameterSpec::optional("scale", "Optional scale"),
            ]
        );
    }

    #[test]
    fn test_duplicate_name_keeps_first() {
        let mut catalog = Catalog::new();
        catalog.register(descriptor("op", first)).unwrap();

        let err = catalog.register(descriptor("op", negate)).unwrap_err();
        assert!(matches!(err, ToolError::DuplicateOperation(ref name) if name == "op"));
        assert_eq!(catalog.len(), 1);

        let handler = catalog.lookup("op").unwrap().handler();
        let args = ResolvedArguments::new(vec![Some(3.0), None]);
        assert_eq!(handler(&args).unwrap(), 3.0);
    }

    #[test]
    fn test_duplicate_parameter_rejected() {
        let mut catalog = Catalog::new();
        let bad = OperationDescriptor::new(
            "bad",
            "Declares x twice",
            vec![
                ParameterSpec::required("x", "First"),
                ParameterSpec::required("x", "Second"),
            ],
            first,
        );

        let err = catalog.register(bad).unwrap_err();
        assert!(matches!(
            err,
            ToolError::DuplicateParameter { ref operation, ref parameter }
                if operation == "bad" && parameter == "x"
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_lookup_unknown() {
        let catalog = Catalog::new();
        let err = catalog.lookup("noop").unwrap_err();
        assert!(matches!(err, ToolError::UnknownOperation(ref name) if name == "noop"));
    }

    #[test]
    fn test_list_in_registration_order_and_restartable() {
        let mut catalog = Catalog::new();
        for name in ["zeta", "alpha", "mid"] {
            catalog.register(descriptor(name, first)).unwrap();
        }

        let listing = catalog.list();
        let first_pass: Vec<_> = listing.clone().map(|d| d.name()).collect();
        let second_pass: Vec<_> = listing.map(|d| d.name()).collect();

        assert_eq!(first_pass, vec!["zeta", "alpha", "mid"]);
        assert_eq!(first_pass, second_pass);
        assert_eq!(catalog.list().len(), 3);
    }

    #[test]
    fn test_input_schema() {
        let schema = descriptor("identity", first).input_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["x"]["type"], "number");
        assert_eq!(schema["properties"]["scale"]["description"], "Optional scale");
        assert_eq!(schema["required"], json!(["x"]));
    }

    #[test]
    fn test_manifest_entry() {
        let mut catalog = Catalog::new();
        catalog.register(descriptor("identity", first)).unwrap();

        let manifest = catalog.manifest();
        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest[0]["name"], "identity");
        assert_eq!(manifest[0]["description"], "identity operation");
        assert!(manifest[0]["inputSchema"]["properties"].get("x").is_some());
    }

    #[test]
    fn test_value_type_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ValueType::Number).unwrap(), "number");
        assert_eq!(ValueType::Number.to_string(), "number");
    }
}
