//! Search criteria and predicate compilation.
//!
//! A `SearchCriterion` is one atomic test (field, operator, value, case
//! rule) contributed by the user. It compiles itself into a boolean
//! predicate over a single node; the orchestrator ANDs compiled predicates
//! together into a compound query.

use crate::core::error::{Result, SiftError};
use crate::core::node::Node;
use serde::{Deserialize, Serialize};

/// Comparison operator for a search criterion.
///
/// The `DoesNot*` half inverts its positive counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOperator {
    Equals,
    DoesNotEqual,
    Contains,
    DoesNotContain,
    StartsWith,
    DoesNotStartWith,
    EndsWith,
    DoesNotEndWith,
}

/// The positive comparison behind an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseTest {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
}

impl BaseTest {
    /// Runs the comparison. Case-insensitive compares use invariant
    /// lowercasing, not locale collation.
    fn matches(self, candidate: &str, value: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            match self {
                Self::Equals => candidate == value,
                Self::Contains => candidate.contains(value),
                Self::StartsWith => candidate.starts_with(value),
                Self::EndsWith => candidate.ends_with(value),
            }
        } else {
            let candidate = candidate.to_lowercase();
            let value = value.to_lowercase();
            match self {
                Self::Equals => candidate == value,
                Self::Contains => candidate.contains(&value),
                Self::StartsWith => candidate.starts_with(&value),
                Self::EndsWith => candidate.ends_with(&value),
            }
        }
    }
}

impl SearchOperator {
    /// Whether this is a `DoesNot*` operator.
    #[must_use]
    pub fn is_inverted(self) -> bool {
        matches!(
            self,
            Self::DoesNotEqual | Self::DoesNotContain | Self::DoesNotStartWith | Self::DoesNotEndWith
        )
    }

    fn base(self) -> BaseTest {
        match self {
            Self::Equals | Self::DoesNotEqual => BaseTest::Equals,
            Self::Contains | Self::DoesNotContain => BaseTest::Contains,
            Self::StartsWith | Self::DoesNotStartWith => BaseTest::StartsWith,
            Self::EndsWith | Self::DoesNotEndWith => BaseTest::EndsWith,
        }
    }
}

impl std::fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Equals => write!(f, "equals"),
            Self::DoesNotEqual => write!(f, "does not equal"),
            Self::Contains => write!(f, "contains"),
            Self::DoesNotContain => write!(f, "does not contain"),
            Self::StartsWith => write!(f, "starts with"),
            Self::DoesNotStartWith => write!(f, "does not start with"),
            Self::EndsWith => write!(f, "ends with"),
            Self::DoesNotEndWith => write!(f, "does not end with"),
        }
    }
}

/// A compiled boolean test over a single node.
pub type NodePredicate = Box<dyn Fn(&Node) -> bool + Send + Sync>;

/// One atomic search test: target field, operator, value, case rule.
///
/// Immutable once constructed. An absent target field makes the criterion a
/// wildcard scan over every attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriterion {
    #[serde(default)]
    target_field: Option<String>,
    operator: SearchOperator,
    value: String,
    #[serde(default)]
    case_sensitive: bool,
}

impl SearchCriterion {
    /// Creates a criterion pinned to one named attribute.
    ///
    /// An empty field name is normalized to a wildcard scan.
    #[must_use]
    pub fn targeted(
        field: impl Into<String>,
        operator: SearchOperator,
        value: impl Into<String>,
        case_sensitive: bool,
    ) -> Self {
        let field = field.into();
        Self {
            target_field: if field.is_empty() { None } else { Some(field) },
            operator,
            value: value.into(),
            case_sensitive,
        }
    }

    /// Creates a wildcard criterion scanning every attribute value.
    #[must_use]
    pub fn wildcard(operator: SearchOperator, value: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            target_field: None,
            operator,
            value: value.into(),
            case_sensitive,
        }
    }

    /// Returns the target field, or `None` for a wildcard scan.
    #[must_use]
    pub fn target_field(&self) -> Option<&str> {
        self.target_field.as_deref()
    }

    /// Returns the operator.
    #[must_use]
    pub fn operator(&self) -> SearchOperator {
        self.operator
    }

    /// Returns the comparison value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the comparison is case-sensitive.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Compiles the criterion into a predicate over a single node.
    ///
    /// Wildcard scans are defined for the contains family only. For targeted
    /// criteria, only the contains family requires the attribute to be
    /// present on the node; the other operators compare a missing attribute
    /// as the empty string, so their inverted forms match nodes lacking the
    /// attribute while `DoesNotContain` does not.
    ///
    /// # Errors
    /// Returns an error for a wildcard scan with a non-contains operator.
    pub fn compile(&self) -> Result<NodePredicate> {
        match &self.target_field {
            None => self.compile_wildcard(),
            Some(field) => Ok(self.compile_targeted(field)),
        }
    }

    fn compile_wildcard(&self) -> Result<NodePredicate> {
        if self.operator.base() != BaseTest::Contains {
            return Err(SiftError::query(
                "unsupported_wildcard_operator",
                format!(
                    "Operator '{}' cannot scan all attributes; only contains-family operators may omit a target field",
                    self.operator
                ),
                "core:criterion",
            )
            .with_context("operator", format!("{:?}", self.operator))
            .with_hint("Name a target field, or use contains / does-not-contain"));
        }

        let value = self.value.clone();
        let inverted = self.operator.is_inverted();

        if self.case_sensitive {
            // Display value is never consulted on the case-sensitive path.
            return Ok(Box::new(move |node: &Node| {
                let any = node.attributes.values().any(|v| v.contains(&value));
                if inverted {
                    !any
                } else {
                    any
                }
            }));
        }

        let needle = value.to_lowercase();
        if inverted {
            // The inverted scan negates the attribute disjunction only; the
            // display value stays out of it.
            Ok(Box::new(move |node: &Node| {
                !node
                    .attributes
                    .values()
                    .any(|v| v.to_lowercase().contains(&needle))
            }))
        } else {
            Ok(Box::new(move |node: &Node| {
                node.attributes
                    .values()
                    .any(|v| v.to_lowercase().contains(&needle))
                    || node.display_value.to_lowercase().contains(&needle)
            }))
        }
    }

    fn compile_targeted(&self, field: &str) -> NodePredicate {
        let field = field.to_string();
        let value = self.value.clone();
        let case_sensitive = self.case_sensitive;
        let inverted = self.operator.is_inverted();
        let base = self.operator.base();

        if base == BaseTest::Contains {
            // Presence guard: inversion negates the comparison, never the
            // guard itself.
            Box::new(move |node: &Node| {
                let Some(actual) = node.attribute(&field) else {
                    return false;
                };
                let hit = base.matches(actual, &value, case_sensitive);
                if inverted {
                    !hit
                } else {
                    hit
                }
            })
        } else {
            Box::new(move |node: &Node| {
                let actual = node.attribute(&field).unwrap_or("");
                let hit = base.matches(actual, &value, case_sensitive);
                if inverted {
                    !hit
                } else {
                    hit
                }
            })
        }
    }
}

impl std::fmt::Display for SearchCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = self.target_field.as_deref().unwrap_or("*");
        write!(f, "{field} {} \"{}\"", self.operator, self.value)?;
        if self.case_sensitive {
            write!(f, " (case-sensitive)")?;
        }
        Ok(())
    }
}
