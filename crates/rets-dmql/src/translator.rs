//! Translation of search queries into DMQL search requests.

use std::fmt;

use rets_proto::{
    Condition, ConditionKind, FieldRef, SearchOptions, SearchQuery, SearchRequest, StorageMap,
    Value,
};
use tracing::{debug, trace};

use crate::encoder::encode;
use crate::error::TranslateError;

/// Which condition kinds are rendered into DMQL.
///
/// Kinds outside the policy are dropped from the filter, the same way kinds
/// with no DMQL rendering are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConditionPolicy {
    /// Equality, inclusion range and less-than.
    #[default]
    Comparisons,
    /// Inclusion range only.
    RangeOnly,
}

impl ConditionPolicy {
    /// Check if a condition kind is rendered under this policy.
    pub fn translates(self, kind: ConditionKind) -> bool {
        match kind {
            ConditionKind::InclusionRange => true,
            ConditionKind::Equality | ConditionKind::LessThan => {
                self == ConditionPolicy::Comparisons
            }
            ConditionKind::NotEqual
            | ConditionKind::GreaterThan
            | ConditionKind::GreaterThanOrEqual
            | ConditionKind::LessThanOrEqual
            | ConditionKind::In
            | ConditionKind::Like
            | ConditionKind::Regexp
            | ConditionKind::Not
            | ConditionKind::Or => false,
        }
    }
}

impl fmt::Display for ConditionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionPolicy::Comparisons => write!(f, "comparisons"),
            ConditionPolicy::RangeOnly => write!(f, "range-only"),
        }
    }
}

/// Translator from [`SearchQuery`] to [`SearchRequest`].
///
/// Translation is pure: no I/O, and the same input always yields the same
/// request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Translator {
    policy: ConditionPolicy,
}

impl Translator {
    /// Create a translator with the given condition policy.
    pub fn new(policy: ConditionPolicy) -> Self {
        Self { policy }
    }

    /// Get the condition policy.
    pub fn policy(&self) -> ConditionPolicy {
        self.policy
    }

    /// Translate a query into a search request.
    ///
    /// Fails if the entity is not mapped or a condition value cannot be
    /// encoded. Unsupported conditions never fail the translation.
    pub fn translate(
        &self,
        storage: &StorageMap,
        query: &SearchQuery,
    ) -> Result<SearchRequest, TranslateError> {
        let target = storage
            .resolve(&query.entity)
            .ok_or_else(|| TranslateError::unmapped_entity(&query.entity))?;

        let dmql = self.translate_conditions(&query.conditions)?;

        trace!(
            entity = %query.entity,
            resource = %target.resource,
            class = %target.class,
            dmql = %dmql,
            "translated query"
        );

        Ok(SearchRequest {
            resource: target.resource.clone(),
            class: target.class.clone(),
            dmql,
            options: SearchOptions {
                select: render_select(&query.fields),
                limit: render_limit(query.limit),
            },
        })
    }

    /// Translate conditions into a DMQL filter, comma-joined in input order.
    ///
    /// Returns an empty string when no condition is rendered.
    pub fn translate_conditions(&self, conditions: &[Condition]) -> Result<String, TranslateError> {
        let mut clauses = Vec::with_capacity(conditions.len());
        for condition in conditions {
            if let Some(clause) = self.translate_condition(condition)? {
                clauses.push(clause);
            }
        }
        Ok(clauses.join(","))
    }

    /// Translate a single condition into a DMQL clause.
    fn translate_condition(&self, condition: &Condition) -> Result<Option<String>, TranslateError> {
        let kind = condition.kind();
        if !self.policy.translates(kind) {
            debug!(
                kind = %kind,
                field = condition.field().map(FieldRef::as_str).unwrap_or(""),
                policy = %self.policy,
                "dropping condition with no DMQL rendering"
            );
            return Ok(None);
        }

        let clause = match condition {
            Condition::Equality { field, value } => {
                format!("({}={})", field, encode_field(field, value)?)
            }
            Condition::InclusionRange { field, lo, hi } => format!(
                "({}={}-{})",
                field,
                encode_field(field, lo)?,
                encode_field(field, hi)?
            ),
            Condition::LessThan { field, value } => {
                format!("({}={}-)", field, encode_field(field, value)?)
            }
            Condition::NotEqual { .. }
            | Condition::GreaterThan { .. }
            | Condition::GreaterThanOrEqual { .. }
            | Condition::LessThanOrEqual { .. }
            | Condition::In { .. }
            | Condition::Like { .. }
            | Condition::Regexp { .. }
            | Condition::Not { .. }
            | Condition::Or { .. } => return Ok(None),
        };

        Ok(Some(clause))
    }
}

/// Join wire field names into a select list, keeping their order.
pub fn render_select(fields: &[FieldRef]) -> String {
    fields
        .iter()
        .map(FieldRef::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a row limit. A missing limit stays missing.
pub fn render_limit(limit: Option<u64>) -> Option<String> {
    limit.map(|n| n.to_string())
}

fn encode_field(field: &FieldRef, value: &Value) -> Result<String, TranslateError> {
    encode(value).map_err(|e| TranslateError::encoding(field.as_str(), e))
}
