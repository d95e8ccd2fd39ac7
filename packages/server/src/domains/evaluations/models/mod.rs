pub mod concept_evaluation;
pub mod feedback;
pub mod project_evaluation;

pub use concept_evaluation::*;
pub use feedback::*;
pub use project_evaluation::*;
