//! Add tool definition.

use crate::domains::tools::catalog::{HandlerResult, ParameterSpec};
use crate::domains::tools::definitions::OperationDefinition;
use crate::domains::tools::dispatcher::ResolvedArguments;

use super::operand_parameters;

/// Add tool - returns `a + b`.
pub struct AddTool;

impl AddTool {
    pub fn execute(a: f64, b: f64) -> f64 {
        a + b
    }
}

impl OperationDefinition for AddTool {
    const NAME: &'static str = "add";
    const DESCRIPTION: &'static str = "Add two numbers";

    fn parameters() -> Vec<ParameterSpec> {
        operand_parameters()
    }

    fn handle(args: &ResolvedArguments) -> HandlerResult {
        Ok(Self::execute(args.required(0)?, args.required(1)?))
    }
}
