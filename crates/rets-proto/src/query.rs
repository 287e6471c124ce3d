//! Query description types.

use std::fmt;

use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A queryable attribute, named as the remote RETS schema knows it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRef(String);

impl FieldRef {
    /// Create a field reference from a wire field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the wire field name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Kind tag of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    Equality,
    InclusionRange,
    LessThan,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    In,
    Like,
    Regexp,
    Not,
    Or,
}

impl ConditionKind {
    /// Every condition kind, in declaration order.
    pub const ALL: [ConditionKind; 12] = [
        ConditionKind::Equality,
        ConditionKind::InclusionRange,
        ConditionKind::LessThan,
        ConditionKind::NotEqual,
        ConditionKind::GreaterThan,
        ConditionKind::GreaterThanOrEqual,
        ConditionKind::LessThanOrEqual,
        ConditionKind::In,
        ConditionKind::Like,
        ConditionKind::Regexp,
        ConditionKind::Not,
        ConditionKind::Or,
    ];
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConditionKind::Equality => "equality",
            ConditionKind::InclusionRange => "inclusion_range",
            ConditionKind::LessThan => "less_than",
            ConditionKind::NotEqual => "not_equal",
            ConditionKind::GreaterThan => "greater_than",
            ConditionKind::GreaterThanOrEqual => "greater_than_or_equal",
            ConditionKind::LessThanOrEqual => "less_than_or_equal",
            ConditionKind::In => "in",
            ConditionKind::Like => "like",
            ConditionKind::Regexp => "regexp",
            ConditionKind::Not => "not",
            ConditionKind::Or => "or",
        };
        f.write_str(name)
    }
}

/// A filter condition over one field.
///
/// Only `Equality`, `InclusionRange` and `LessThan` have a DMQL rendering.
/// The remaining variants exist because a host ORM can express them; the
/// translator drops them instead of failing the read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Field equals value.
    Equality { field: FieldRef, value: Value },
    /// Field lies within `lo..=hi`.
    InclusionRange { field: FieldRef, lo: Value, hi: Value },
    /// Field is at most value (RETS open-ended range).
    LessThan { field: FieldRef, value: Value },
    /// Field not equals value.
    NotEqual { field: FieldRef, value: Value },
    /// Field greater than value.
    GreaterThan { field: FieldRef, value: Value },
    /// Field greater than or equal to value.
    GreaterThanOrEqual { field: FieldRef, value: Value },
    /// Field less than or equal to value.
    LessThanOrEqual { field: FieldRef, value: Value },
    /// Field is one of a set of values.
    In { field: FieldRef, values: Vec<Value> },
    /// Field matches a LIKE pattern.
    Like { field: FieldRef, pattern: String },
    /// Field matches a regular expression.
    Regexp { field: FieldRef, pattern: String },
    /// Negated condition.
    Not { condition: Box<Condition> },
    /// At least one condition must hold.
    Or { conditions: Vec<Condition> },
}

impl Condition {
    /// Create an equality condition.
    pub fn eq(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Condition::Equality {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an inclusive range condition.
    pub fn range(
        field: impl Into<FieldRef>,
        lo: impl Into<Value>,
        hi: impl Into<Value>,
    ) -> Self {
        Condition::InclusionRange {
            field: field.into(),
            lo: lo.into(),
            hi: hi.into(),
        }
    }

    /// Create a less-than condition.
    pub fn lt(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Condition::LessThan {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than condition.
    pub fn gt(field: impl Into<FieldRef>, value: impl Into<Value>) -> Self {
        Condition::GreaterThan {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create a negated condition.
    pub fn not(condition: Condition) -> Self {
        Condition::Not {
            condition: Box::new(condition),
        }
    }

    /// Get the kind tag of this condition.
    pub fn kind(&self) -> ConditionKind {
        match self {
            Condition::Equality { .. } => ConditionKind::Equality,
            Condition::InclusionRange { .. } => ConditionKind::InclusionRange,
            Condition::LessThan { .. } => ConditionKind::LessThan,
            Condition::NotEqual { .. } => ConditionKind::NotEqual,
            Condition::GreaterThan { .. } => ConditionKind::GreaterThan,
            Condition::GreaterThanOrEqual { .. } => ConditionKind::GreaterThanOrEqual,
            Condition::LessThanOrEqual { .. } => ConditionKind::LessThanOrEqual,
            Condition::In { .. } => ConditionKind::In,
            Condition::Like { .. } => ConditionKind::Like,
            Condition::Regexp { .. } => ConditionKind::Regexp,
            Condition::Not { .. } => ConditionKind::Not,
            Condition::Or { .. } => ConditionKind::Or,
        }
    }

    /// Get the field this condition constrains, if it constrains exactly one.
    pub fn field(&self) -> Option<&FieldRef> {
        match self {
            Condition::Equality { field, .. }
            | Condition::InclusionRange { field, .. }
            | Condition::LessThan { field, .. }
            | Condition::NotEqual { field, .. }
            | Condition::GreaterThan { field, .. }
            | Condition::GreaterThanOrEqual { field, .. }
            | Condition::LessThanOrEqual { field, .. }
            | Condition::In { field, .. }
            | Condition::Like { field, .. }
            | Condition::Regexp { field, .. } => Some(field),
            Condition::Not { .. } | Condition::Or { .. } => None,
        }
    }
}

/// A read query against one mapped entity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Entity name, resolved through a [`StorageMap`](crate::StorageMap).
    pub entity: String,
    /// Wire field names to select, in output order.
    #[serde(default)]
    pub fields: Vec<FieldRef>,
    /// Filter conditions, AND'd in order.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Maximum number of rows. `None` leaves the limit to the server.
    #[serde(default)]
    pub limit: Option<u64>,
}

impl SearchQuery {
    /// Create a new query for an entity.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            ..Self::default()
        }
    }

    /// Set the fields to select.
    pub fn with_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<FieldRef>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Add a field to select.
    pub fn select(mut self, field: impl Into<FieldRef>) -> Self {
        self.fields.push(field.into());
        self
    }

    /// Add a filter condition.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Set the row limit.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
