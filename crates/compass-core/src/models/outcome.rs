//! Decision-tree branches attached to richer "decision" goals.

use serde::{Deserialize, Serialize};

/// One possible outcome of a decision goal, with the follow-up steps it
/// would imply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    /// Description of the outcome
    #[serde(default)]
    pub text: String,

    /// Next steps to take if this outcome is chosen
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_steps: Vec<String>,
}
