//! Subtract tool definition.

use crate::domains::tools::catalog::{HandlerResult, ParameterSpec};
use crate::domains::tools::definitions::OperationDefinition;
use crate::domains::tools::dispatcher::ResolvedArguments;

use super::operand_parameters;

/// Subtract tool - returns `a - b`.
pub struct SubtractTool;

impl SubtractTool {
    pub fn execute(a: f64, b: f64) -> f64 {
        a - b
    }
}

impl OperationDefinition for SubtractTool {
    const NAME: &'static str = "subtract";
    const DESCRIPTION: &'static str = "Subtract two numbers";

    fn parameters() -> Vec<ParameterSpec> {
        operand_parameters()
    }

    fn handle(args: &ResolvedArguments) -> HandlerResult {
        Ok(Self::execute(args.required(0)?, args.required(1)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract() {
        assert_eq!(SubtractTool::execute(5.0, 7.0), -2.0);
    }

    #[test]
    fn test_operand_order_matters() {
        let args = ResolvedArguments::new(vec![Some(10.0), Some(4.0)]);
        assert_eq!(SubtractTool::handle(&args), Ok(6.0));
    }

    #[test]
    fn test_infinity_minus_infinity_is_nan() {
        assert!(SubtractTool::execute(f64::INFINITY, f64::INFINITY).is_nan());
    }
}
