use std::fmt;

use serde::Serialize;

/// Label prefix the tournament uses for group-stage phases ("Grupa A", ...).
pub const GROUP_PREFIX: &str = "Grupa";

/// Tournament stage a match belongs to. Decides the scoring rules: group
/// matches award points, knockout matches must produce a winner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label")]
pub enum Phase {
    GroupStage(String),
    Knockout(String),
}

impl Phase {
    pub fn group(label: impl Into<String>) -> Self {
        Phase::GroupStage(label.into())
    }

    pub fn knockout(label: impl Into<String>) -> Self {
        Phase::Knockout(label.into())
    }

    /// Classify a free-form label: anything starting with [`GROUP_PREFIX`]
    /// is a group stage, everything else is a knockout stage.
    pub fn from_label(label: &str) -> Self {
        if label.starts_with(GROUP_PREFIX) {
            Phase::GroupStage(label.to_string())
        } else {
            Phase::Knockout(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Phase::GroupStage(label) | Phase::Knockout(label) => label,
        }
    }

    pub fn is_knockout(&self) -> bool {
        matches!(self, Phase::Knockout(_))
    }
}

/// Unlabelled matches fall outside the group prefix, so they are knockouts.
impl Default for Phase {
    fn default() -> Self {
        Phase::Knockout("Faza grupowa".to_string())
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_classifies_by_prefix() {
        assert_eq!(Phase::from_label("Grupa C"), Phase::group("Grupa C"));
        assert_eq!(Phase::from_label("Ćwierćfinał"), Phase::knockout("Ćwierćfinał"));
        assert_eq!(Phase::from_label("grupa c"), Phase::knockout("grupa c"));
    }

    #[test]
    fn test_label_and_display() {
        let phase = Phase::knockout("Finał");
        assert_eq!(phase.label(), "Finał");
        assert_eq!(phase.to_string(), "Finał");
        assert!(phase.is_knockout());
    }

    #[test]
    fn test_default_agrees_with_label_classification() {
        let phase = Phase::default();
        assert_eq!(Phase::from_label(phase.label()), phase);
        assert!(phase.is_knockout());
    }
}
