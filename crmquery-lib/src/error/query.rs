//! Query builder error types

/// Errors raised while building a query expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The builder was used out of order, e.g. `or` before any `where_`.
    #[error("{0}")]
    InvalidState(String),

    /// A join named a parent entity that is neither the root nor joined yet.
    ///
    /// Only recorded under [`UnmatchedTarget::Reject`](crate::api::query::UnmatchedTarget::Reject).
    #[error("Join to '{to_entity}' dropped: no root or link entity named '{from_entity}'")]
    UnmatchedJoin {
        from_entity: String,
        to_entity: String,
    },

    /// A filter named an entity that is neither the root nor joined yet.
    ///
    /// Only recorded under [`UnmatchedTarget::Reject`](crate::api::query::UnmatchedTarget::Reject).
    #[error("Filter dropped: no root or link entity named '{entity}'")]
    UnmatchedWhere { entity: String },

    /// A condition operator name was not recognised.
    #[error("Unknown condition operator '{0}'")]
    UnknownOperator(String),
}

impl QueryError {
    /// Creates an invalid-state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates an unmatched join error.
    pub fn unmatched_join(from_entity: impl Into<String>, to_entity: impl Into<String>) -> Self {
        Self::UnmatchedJoin {
            from_entity: from_entity.into(),
            to_entity: to_entity.into(),
        }
    }

    /// Creates an unmatched filter error.
    pub fn unmatched_where(entity: impl Into<String>) -> Self {
        Self::UnmatchedWhere {
            entity: entity.into(),
        }
    }

    /// Returns `true` if this error reports a dropped join or filter.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, Self::UnmatchedJoin { .. } | Self::UnmatchedWhere { .. })
    }
}
