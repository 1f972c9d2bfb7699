//! One named filter dimension

use serde::{Deserialize, Serialize};

/// A single facet selection
///
/// `All` admits every value (the identity predicate); `Only(v)` admits
/// exactly `v`. Facets compose by conjunction, so a filter built from
/// defaults admits everything.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facet<T> {
    /// No constraint
    #[default]
    All,
    /// Constrained to one value
    Only(T),
}

impl<T: PartialEq> Facet<T> {
    /// Whether `value` passes this facet
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(selected) => selected == value,
        }
    }

    /// Whether a constraint is set
    pub fn is_active(&self) -> bool {
        matches!(self, Facet::Only(_))
    }

    /// The selected value, if constrained
    pub fn selected(&self) -> Option<&T> {
        match self {
            Facet::All => None,
            Facet::Only(v) => Some(v),
        }
    }
}

impl Facet<String> {
    /// Convenience constructor from a string slice
    pub fn only(value: &str) -> Self {
        Facet::Only(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_admits_everything() {
        let facet: Facet<String> = Facet::All;
        assert!(facet.admits(&"anything".to_string()));
        assert!(!facet.is_active());
    }

    #[test]
    fn test_only_admits_exact_value() {
        let facet = Facet::only("WOE");
        assert!(facet.admits(&"WOE".to_string()));
        assert!(!facet.admits(&"Glouc".to_string()));
        assert!(!facet.admits(&"woe".to_string())); // exact, case-sensitive
        assert!(facet.is_active());
    }
}
