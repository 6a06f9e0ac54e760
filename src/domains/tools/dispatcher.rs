//! Dispatcher - validates a call against the catalog and runs the handler.
//!
//! Dispatch is synchronous and stateless. A [`Dispatcher`] only holds a
//! shared reference to the published [`Catalog`], so clones can be handed to
//! any number of concurrent callers.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::catalog::{Catalog, OperationDescriptor, ParameterSpec, ValueType};
use super::error::{HandlerError, ToolError};

/// Outcome of a single invocation.
pub type InvocationResult = Result<f64, ToolError>;

/// A single call as it arrives from the host, in MCP `tools/call` shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvocationRequest {
    #[serde(rename = "name")]
    pub operation: String,

    #[serde(default)]
    pub arguments: Value,
}

/// Arguments supplied by a caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    /// Values keyed by parameter name.
    Named(Map<String, Value>),

    /// Values in parameter declaration order.
    Positional(Vec<Value>),
}

impl Default for Arguments {
    fn default() -> Self {
        Self::Named(Map::new())
    }
}

impl Arguments {
    /// Interpret a JSON payload: objects are named, arrays positional and
    /// `null` means no arguments.
    pub fn from_json(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(Self::Named(map)),
            Value::Array(values) => Ok(Self::Positional(values)),
            Value::Null => Ok(Self::default()),
            other => Err(format!(
                "expected an object or an array of arguments, got {}",
                json_type_name(&other)
            )),
        }
    }

    fn supplied(&self, index: usize, spec: &ParameterSpec) -> Option<&Value> {
        let value = match self {
            Self::Named(map) => map.get(&spec.name),
            Self::Positional(values) => values.get(index),
        };
        value.filter(|v| !v.is_null())
    }
}

impl From<Map<String, Value>> for Arguments {
    fn from(map: Map<String, Value>) -> Self {
        Self::Named(map)
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

/// Validated values in parameter declaration order.
///
/// Optional parameters that were not supplied are `None`. Required ones are
/// always present by the time a handler sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArguments {
    values: Vec<Option<f64>>,
}

impl ResolvedArguments {
    pub fn new(values: Vec<Option<f64>>) -> Self {
        Self { values }
    }

    /// Value at `index`, if supplied.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().flatten()
    }

    /// Value of a required parameter.
    pub fn required(&self, index: usize) -> Result<f64, HandlerError> {
        self.get(index)
            .ok_or_else(|| HandlerError::domain(format!("argument {index} was not resolved")))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Executes invocations against a published catalog.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    catalog: Arc<Catalog>,
}

impl Dispatcher {
    /// Create a dispatcher over a fully built catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// The catalog this dispatcher serves.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Invoke an operation by name.
    ///
    /// Either every argument validates and the handler runs exactly once,
    /// or the handler is not called and a validation error is returned.
    #[instrument(skip(self, arguments))]
    pub fn invoke(&self, operation: &str, arguments: &Arguments) -> InvocationResult {
        let descriptor = self.catalog.lookup(operation).inspect_err(|_| {
            warn!("Unknown operation requested: {}", operation);
        })?;

        let resolved = resolve(descriptor, arguments).inspect_err(|e| {
            warn!("Rejected call to '{}': {}", operation, e);
        })?;

        match (descriptor.handler())(&resolved) {
            Ok(value) => {
                debug!("Operation '{}' returned {}", operation, value);
                Ok(value)
            }
            Err(e) => {
                warn!("Operation '{}' failed: {}", operation, e);
                Err(ToolError::operation(operation, e))
            }
        }
    }

    /// Invoke with a raw JSON argument payload.
    pub fn invoke_json(&self, operation: &str, arguments: Value) -> InvocationResult {
        let arguments = Arguments::from_json(arguments)
            .map_err(|reason| ToolError::invalid_arguments(operation, reason))?;
        self.invoke(operation, &arguments)
    }

    /// Invoke a deserialized request.
    pub fn dispatch(&self, request: InvocationRequest) -> InvocationResult {
        self.invoke_json(&request.operation, request.arguments)
    }
}

/// Check every declared parameter in order and collect its value.
fn resolve(
    descriptor: &OperationDescriptor,
    arguments: &Arguments,
) -> Result<ResolvedArguments, ToolError> {
    let parameters = descriptor.parameters();

    match arguments {
        Arguments::Positional(values) if values.len() > parameters.len() => {
            return Err(ToolError::invalid_arguments(
                descriptor.name(),
                format!(
                    "expected at most {} arguments, got {}",
                    parameters.len(),
                    values.len()
                ),
            ));
        }
        Arguments::Named(map) => {
            for key in map.keys() {
                if !parameters.iter().any(|p| &p.name == key) {
                    debug!("Ignoring undeclared argument '{}' for '{}'", key, descriptor.name());
                }
            }
        }
        _ => {}
    }

    let mut values = Vec::with_capacity(parameters.len());
    for (index, spec) in parameters.iter().enumerate() {
        let value = match arguments.supplied(index, spec) {
            Some(raw) => Some(interpret(raw, spec.value_type).ok_or_else(|| {
                ToolError::type_mismatch(descriptor.name(), &spec.name, spec.value_type)
            })?),
            None if spec.required => {
                return Err(ToolError::missing_argument(descriptor.name(), &spec.name));
            }
            None => None,
        };
        values.push(value);
    }

    Ok(ResolvedArguments::new(values))
}

/// Read a JSON value as the declared type.
///
/// Numeric strings are accepted so that NaN and infinities, which JSON
/// numbers cannot express, can still be passed.
fn interpret(value: &Value, value_type: ValueType) -> Option<f64> {
    match value_type {
        ValueType::Number => match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        },
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
