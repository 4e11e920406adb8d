use crate::common::FieldValue;
use std::fmt::Display;

/// The closed set of comparison operators a reference field supports in
/// query conditions.
///
/// Operators outside this set are rejected while building the query
/// condition, before anything reaches the persistence layer. Each operator
/// maps to one of two cast strategies: the operand is cast as a single
/// reference, or as a sequence of references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    /// Not equal (`$ne`)
    Ne,
    /// Greater than (`$gt`)
    Gt,
    /// Greater than or equal (`$gte`)
    Gte,
    /// Less than (`$lt`)
    Lt,
    /// Less than or equal (`$lte`)
    Lte,
    /// Member of (`$in`)
    In,
    /// Not a member of (`$nin`)
    Nin,
}

impl ComparisonOperator {
    /// Parses an operator token into a `ComparisonOperator`.
    ///
    /// # Arguments
    ///
    /// * `token` - The operator token (e.g. `"$ne"`)
    ///
    /// # Returns
    ///
    /// `Some(operator)` for a supported token, `None` otherwise
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "$ne" => Some(ComparisonOperator::Ne),
            "$gt" => Some(ComparisonOperator::Gt),
            "$gte" => Some(ComparisonOperator::Gte),
            "$lt" => Some(ComparisonOperator::Lt),
            "$lte" => Some(ComparisonOperator::Lte),
            "$in" => Some(ComparisonOperator::In),
            "$nin" => Some(ComparisonOperator::Nin),
            _ => None,
        }
    }

    /// Gets the operator token.
    pub fn token(&self) -> &'static str {
        match self {
            ComparisonOperator::Ne => "$ne",
            ComparisonOperator::Gt => "$gt",
            ComparisonOperator::Gte => "$gte",
            ComparisonOperator::Lt => "$lt",
            ComparisonOperator::Lte => "$lte",
            ComparisonOperator::In => "$in",
            ComparisonOperator::Nin => "$nin",
        }
    }

    /// Gets the cast strategy for the operator's operand.
    ///
    /// Membership operators take a sequence of values; every other operator
    /// takes a single value.
    pub fn strategy(&self) -> CastStrategy {
        match self {
            ComparisonOperator::In | ComparisonOperator::Nin => CastStrategy::Sequence,
            _ => CastStrategy::Single,
        }
    }
}

impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// How a comparison operator's operand is cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastStrategy {
    /// The operand is cast as one reference value.
    Single,
    /// The operand is a sequence; every element is cast independently.
    Sequence,
}

/// The cast operand of a query condition, ready for the query layer.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryTarget {
    /// A single cast value.
    Single(FieldValue),
    /// A sequence of cast values, in operand order.
    Many(Vec<FieldValue>),
}

impl QueryTarget {
    /// Returns the single cast value, if this is a [QueryTarget::Single].
    pub fn as_single(&self) -> Option<&FieldValue> {
        match self {
            QueryTarget::Single(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the sequence of cast values, if this is a [QueryTarget::Many].
    pub fn as_many(&self) -> Option<&[FieldValue]> {
        match self {
            QueryTarget::Many(values) => Some(values),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_tokens() {
        assert_eq!(ComparisonOperator::parse("$ne"), Some(ComparisonOperator::Ne));
        assert_eq!(ComparisonOperator::parse("$gt"), Some(ComparisonOperator::Gt));
        assert_eq!(ComparisonOperator::parse("$gte"), Some(ComparisonOperator::Gte));
        assert_eq!(ComparisonOperator::parse("$lt"), Some(ComparisonOperator::Lt));
        assert_eq!(ComparisonOperator::parse("$lte"), Some(ComparisonOperator::Lte));
        assert_eq!(ComparisonOperator::parse("$in"), Some(ComparisonOperator::In));
        assert_eq!(ComparisonOperator::parse("$nin"), Some(ComparisonOperator::Nin));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(ComparisonOperator::parse("$xor"), None);
        assert_eq!(ComparisonOperator::parse("$eq"), None);
        assert_eq!(ComparisonOperator::parse("ne"), None);
        assert_eq!(ComparisonOperator::parse(""), None);
    }

    #[test]
    fn test_token_round_trips() {
        for op in [
            ComparisonOperator::Ne,
            ComparisonOperator::Gt,
            ComparisonOperator::Gte,
            ComparisonOperator::Lt,
            ComparisonOperator::Lte,
            ComparisonOperator::In,
            ComparisonOperator::Nin,
        ] {
            assert_eq!(ComparisonOperator::parse(op.token()), Some(op));
        }
    }

    #[test]
    fn test_strategy_mapping() {
        assert_eq!(ComparisonOperator::Ne.strategy(), CastStrategy::Single);
        assert_eq!(ComparisonOperator::Gt.strategy(), CastStrategy::Single);
        assert_eq!(ComparisonOperator::Lte.strategy(), CastStrategy::Single);
        assert_eq!(ComparisonOperator::In.strategy(), CastStrategy::Sequence);
        assert_eq!(ComparisonOperator::Nin.strategy(), CastStrategy::Sequence);
    }

    #[test]
    fn test_query_target_accessors() {
        let single = QueryTarget::Single(FieldValue::Empty);
        assert!(single.as_single().is_some());
        assert!(single.as_many().is_none());

        let many = QueryTarget::Many(vec![FieldValue::Empty]);
        assert!(many.as_many().is_some());
        assert!(many.as_single().is_none());
    }
}
