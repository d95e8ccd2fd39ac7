//! Typed ID definitions for persisted evaluation records.

pub use super::id::Id;

/// Marker type for concept evaluation rows.
pub struct ConceptEvaluationRecord;

/// Marker type for project evaluation rows.
pub struct ProjectEvaluationRecord;

/// Typed ID for concept evaluation rows.
pub type ConceptEvaluationId = Id<ConceptEvaluationRecord>;

/// Typed ID for project evaluation rows.
pub type ProjectEvaluationId = Id<ProjectEvaluationRecord>;
