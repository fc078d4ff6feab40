//! Builder configuration

/// What the builder does when a join or filter names an entity that is
/// neither the root nor an attached link.
///
/// The same policy applies to [`join`](super::CrmQuery::join) and
/// [`where_`](super::CrmQuery::where_). In every mode the query itself is
/// left without the join or filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedTarget {
    /// Drop silently.
    Ignore,
    /// Drop and emit a `log::warn!`.
    #[default]
    Warn,
    /// Drop and record a [`QueryError`](crate::error::QueryError), returned
    /// by [`CrmQuery::into_query`](super::CrmQuery::into_query).
    Reject,
}

/// Configuration for a [`CrmQuery`](super::CrmQuery).
///
/// # Example
///
/// ```
/// use crmquery_lib::api::query::{BuilderConfig, UnmatchedTarget};
///
/// let config = BuilderConfig::default()
///     .with_unmatched_target(UnmatchedTarget::Reject)
///     .with_case_insensitive_names(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
    /// Handling of joins and filters whose entity cannot be found.
    ///
    /// Default: [`UnmatchedTarget::Warn`]
    pub unmatched_target: UnmatchedTarget,

    /// Compare entity names ignoring ASCII case.
    ///
    /// Default: `false`
    pub case_insensitive_names: bool,
}

impl BuilderConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unmatched-target policy.
    pub fn with_unmatched_target(mut self, policy: UnmatchedTarget) -> Self {
        self.unmatched_target = policy;
        self
    }

    /// Sets case-insensitive entity name matching.
    pub fn with_case_insensitive_names(mut self, enabled: bool) -> Self {
        self.case_insensitive_names = enabled;
        self
    }

    /// A config that fails loudly on any unmatched join or filter.
    pub fn strict() -> Self {
        Self::default().with_unmatched_target(UnmatchedTarget::Reject)
    }
}
