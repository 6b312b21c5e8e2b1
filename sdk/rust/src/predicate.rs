//! Predicate tree
//!
//! Compiled form of a search: leaves test one field, groups combine children
//! with AND/OR. The operator carries its own operands, so a range always has
//! exactly two bounds and the text operators exactly one value.

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    Leaf {
        field: String,
        operator: Operator,
    },
    Group {
        combinator: Combinator,
        children: Vec<Predicate>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Operator {
    /// Case-insensitive substring
    Contains(String),
    /// Exact, case-sensitive
    Equals(String),
    /// Inclusive range `low <= v <= high`
    Between(FieldValue, FieldValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    And,
    Or,
}

impl Predicate {
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            field: field.into(),
            operator: Operator::Contains(value.into()),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Leaf {
            field: field.into(),
            operator: Operator::Equals(value.into()),
        }
    }

    pub fn between(
        field: impl Into<String>,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Self {
        Self::Leaf {
            field: field.into(),
            operator: Operator::Between(low.into(), high.into()),
        }
    }

    /// AND group
    pub fn all(children: Vec<Predicate>) -> Self {
        Self::Group {
            combinator: Combinator::And,
            children,
        }
    }

    /// OR group
    pub fn any(children: Vec<Predicate>) -> Self {
        Self::Group {
            combinator: Combinator::Or,
            children,
        }
    }

    /// Matches every row
    pub fn identity() -> Self {
        Self::all(Vec::new())
    }

    pub fn is_identity(&self) -> bool {
        matches!(
            self,
            Self::Group {
                combinator: Combinator::And,
                children,
            } if children.is_empty()
        )
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Group { children, .. } => children.iter().map(Self::leaf_count).sum(),
        }
    }
}
