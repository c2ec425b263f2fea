use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::motivation::{MotivationRequest, MotivationResponse, MotivationService};

pub struct MotivationController {
    motivation_service: Arc<MotivationService>,
}

impl MotivationController {
    pub fn new(motivation_service: Arc<MotivationService>) -> Self {
        Self { motivation_service }
    }

    /// POST /get_motivation - Get a motivational response from an LLM
    ///
    /// Always answers 200: provider failures and unknown providers come
    /// back as diagnostic text in the `text` field.
    pub async fn get_motivation(
        State(controller): State<Arc<MotivationController>>,
        Json(request): Json<MotivationRequest>,
    ) -> Json<MotivationResponse> {
        let text = controller
            .motivation_service
            .get_motivation(&request.text, &request.provider, &request.api_key)
            .await;

        Json(MotivationResponse { text })
    }
}
