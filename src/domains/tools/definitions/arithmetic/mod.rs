//! Binary arithmetic over IEEE-754 doubles.

pub mod add;
pub mod divide;
pub mod multiply;
pub mod subtract;

pub use add::AddTool;
pub use divide::DivideTool;
pub use multiply::MultiplyTool;
pub use subtract::SubtractTool;

use crate::domains::tools::catalog::ParameterSpec;

/// The `a`, `b` parameter pair shared by add, subtract and multiply.
pub(crate) fn operand_parameters() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::required("a", "First number"),
        ParameterSpec::required("b", "Second number"),
    ]
}
