//! Divide tool definition.
//!
//! The only arithmetic operation with a domain failure: an exactly zero
//! divisor is rejected before dividing, so callers get an error instead of
//! an infinite or NaN quotient.

use crate::domains::tools::catalog::{HandlerResult, ParameterSpec};
use crate::domains::tools::definitions::OperationDefinition;
use crate::domains::tools::dispatcher::ResolvedArguments;
use crate::domains::tools::error::HandlerError;

/// Divide tool - returns `dividend / divisor`.
pub struct DivideTool;

impl DivideTool {
    pub fn execute(dividend: f64, divisor: f64) -> HandlerResult {
        // Exact comparison; -0.0 == 0.0 and NaN != 0.0.
        if divisor == 0.0 {
            return Err(HandlerError::DivisionByZero);
        }
        Ok(dividend / divisor)
    }
}

impl OperationDefinition for DivideTool {
    const NAME: &'static str = "divide";
    const DESCRIPTION: &'static str = "Divide two numbers";

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("dividend", "Dividend"),
            ParameterSpec::required("divisor", "Divisor"),
        ]
    }

    fn handle(args: &ResolvedArguments) -> HandlerResult {
        Self::execute(args.required(0)?, args.required(1)?)
    }
}
