pub mod evaluate;
pub mod store;

pub use evaluate::{
    evaluate_video, ConceptNormalization, EvaluateVideoInput, EvaluationOutcome,
    NormalizedEvaluation, ProjectNormalization,
};
pub use store::{store_evaluation, StoreEvaluationInput, StoredEvaluation};
