// Kernel - infrastructure seams (LLM providers, persistence) and their wiring

pub mod ai;
pub mod deps;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use ai::LlmVideoEvaluator;
pub use deps::ServerDeps;
pub use store::PostgresEvaluationStore;
pub use traits::*;
