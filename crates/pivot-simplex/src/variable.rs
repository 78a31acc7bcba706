use std::fmt;

/// Identifies a structural or slack variable of the tableau
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    /// Zero-based index among the variables of the same kind
    pub ordinal: usize,
    /// Whether this is a slack variable added for a constraint
    pub is_slack: bool,
}

impl Variable {
    pub fn new(ordinal: usize, is_slack: bool) -> Self {
        Self { ordinal, is_slack }
    }

    pub fn structural(ordinal: usize) -> Self {
        Self::new(ordinal, false)
    }

    pub fn slack(ordinal: usize) -> Self {
        Self::new(ordinal, true)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.is_slack { 's' } else { 'x' };
        write!(f, "{}{}", prefix, self.ordinal + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_equality() {
        let variable0 = Variable::new(2, true);
        let variable1 = Variable::new(2, true);
        let variable2 = Variable::new(1, true);
        let variable3 = Variable::new(2, false);

        assert_eq!(variable0, variable1);
        assert_ne!(variable0, variable2);
        assert_ne!(variable0, variable3);
    }

    #[test]
    fn test_labels_are_one_based() {
        assert_eq!(Variable::structural(0).to_string(), "x1");
        assert_eq!(Variable::slack(2).to_string(), "s3");
    }
}
