use std::sync::Arc;

use crate::application::ports::{CallRepository, InteractionClient};
use crate::application::services::CallProcessingService;

pub struct AppState<C: InteractionClient> {
    pub processing_service: Arc<CallProcessingService<C>>,
    pub call_repository: Arc<dyn CallRepository>,
}

impl<C: InteractionClient> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            processing_service: Arc::clone(&self.processing_service),
            call_repository: Arc::clone(&self.call_repository),
        }
    }
}
