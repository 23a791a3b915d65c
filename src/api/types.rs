//! Shared API state.

use std::sync::Arc;

use crate::store::PatientStore;

/// State handed to every endpoint handler.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<PatientStore>,
}

impl ApiContext {
    pub fn new(store: Arc<PatientStore>) -> Self {
        Self { store }
    }
}
