// ServerDeps - the injected infrastructure handed to every request
//
// Built once in main (or a test) and passed explicitly into the router.

use std::sync::Arc;

use super::{BaseEvaluationStore, BaseVideoEvaluator};

#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseEvaluationStore>,
    pub evaluator: Arc<dyn BaseVideoEvaluator>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseEvaluationStore>, evaluator: Arc<dyn BaseVideoEvaluator>) -> Self {
        Self { store, evaluator }
    }
}
