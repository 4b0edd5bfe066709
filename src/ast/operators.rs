use crate::value::Value;

/// Comparison operators.
///
/// Both sides are compared by their string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Case-sensitive equality (`eq`)
    Equals,
    /// Left side contains right side (`contains`)
    Contains,
    /// Case-folded `contains` (`icontains`)
    IContains,
}

impl CompareOp {
    pub fn apply(&self, lhs: &Value, rhs: &Value) -> bool {
        let (lhs, rhs) = (lhs.to_string(), rhs.to_string());
        match self {
            CompareOp::Equals => lhs == rhs,
            CompareOp::Contains => lhs.contains(&rhs),
            CompareOp::IContains => lhs.to_lowercase().contains(&rhs.to_lowercase()),
        }
    }
}
