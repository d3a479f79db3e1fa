use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A boolean atom, named by a single letter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::Constructor,
    derive_more::Deref,
    derive_more::From,
    derive_more::Into,
)]
pub struct Variable(pub char);

impl Variable {
    /// A token names a variable iff it is exactly one letter.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            // letter numbers such as roman numerals are alphabetic but not letters
            (Some(c), None) if c.is_alphabetic() && !c.is_numeric() => Some(Self(c)),
            _ => None,
        }
    }
}

pub fn extract_variables(expression: &str) -> Vec<Variable> {
    expression
        .split_whitespace()
        .filter_map(Variable::from_token)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn vars(s: &str) -> Vec<Variable> {
        s.chars().map(Variable).collect()
    }

    #[test]
    fn test_extract_variables() {
        assert_eq!(extract_variables("( p -> q ) AND p -> q"), vars("pq"));
        assert_eq!(extract_variables("z OR a OR M"), vars("Maz"));
        assert_eq!(extract_variables("(p AND q)"), vec![]);
        assert_eq!(extract_variables("¬ p ∧ λ"), vars("pλ"));
        assert_eq!(extract_variables("1 OR _ OR p"), vars("p"));
        assert_eq!(extract_variables("\u{216B} OR p OR \u{2160}"), vars("p"));
        assert_eq!(extract_variables(""), vec![]);
    }

    proptest! {
        #[test]
        fn extracted_variables_are_sorted_and_distinct(expr in "[a-d ()~&|-]{0,40}") {
            let vs = extract_variables(&expr);
            prop_assert!(vs.windows(2).all(|w| w[0] < w[1]));
            for v in &vs {
                prop_assert!(expr.split_whitespace().any(|t| t == v.to_string()));
            }
        }
    }
}
