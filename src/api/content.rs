use serde_json::Value;

use super::http::{decode_envelope, ApiClient, Method, Transport, NO_BODY};
use super::ApiResponse;
use crate::model::{
    AiResult, AiServiceRequest, CategorizeResponse, Content, CreateContentRequest, QuizResponse,
    SummaryResponse, UpdateContentRequest,
};
use crate::normalize::normalize_generated;

/// Content management and AI generation against the backend.
///
/// No method fails: transport and decode errors come back as
/// `{success: false, error}` with a fixed message per operation.
pub trait ContentService {
    fn list_content(&self) -> ApiResponse<Vec<Content>>;
    fn get_content(&self, id: &str) -> ApiResponse<Content>;
    fn create_content(&self, request: &CreateContentRequest) -> ApiResponse<Content>;
    fn update_content(&self, id: &str, request: &UpdateContentRequest) -> ApiResponse<Content>;
    fn delete_content(&self, id: &str) -> ApiResponse<Value>;

    /// Free-form generation; the AI payload is normalized into [`AiResult`].
    fn generate_content(&self, request: &AiServiceRequest) -> ApiResponse<AiResult>;

    fn generate_summary(&self, id: &str) -> ApiResponse<SummaryResponse>;
    fn generate_quiz(&self, id: &str) -> ApiResponse<QuizResponse>;
    fn categorize_content(&self, id: &str) -> ApiResponse<CategorizeResponse>;
}

impl<T: Transport> ContentService for ApiClient<T> {
    fn list_content(&self) -> ApiResponse<Vec<Content>> {
        self.exchange(Method::Get, "/api/content", NO_BODY, "Failed to fetch content")
    }

    fn get_content(&self, id: &str) -> ApiResponse<Content> {
        self.exchange(
            Method::Get,
            &format!("/api/content/{}", id),
            NO_BODY,
            "Failed to fetch content",
        )
    }

    fn create_content(&self, request: &CreateContentRequest) -> ApiResponse<Content> {
        self.exchange(
            Method::Post,
            "/api/content",
            Some(request),
            "Failed to create content",
        )
    }

    fn update_content(&self, id: &str, request: &UpdateContentRequest) -> ApiResponse<Content> {
        self.exchange(
            Method::Put,
            &format!("/api/content/{}", id),
            Some(request),
            "Failed to update content",
        )
    }

    fn delete_content(&self, id: &str) -> ApiResponse<Value> {
        self.exchange(
            Method::Delete,
            &format!("/api/content/{}", id),
            NO_BODY,
            "Failed to delete content",
        )
    }

    fn generate_content(&self, request: &AiServiceRequest) -> ApiResponse<AiResult> {
        const FAILURE: &str = "Failed to generate content";

        let reply = match self.send(Method::Post, "/api/content/generate", Some(request)) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(kind = %request.kind, error = %e, "{}", FAILURE);
                return ApiResponse::failure(FAILURE);
            }
        };

        tracing::debug!(kind = %request.kind, body = %reply.body, "AI generation reply");
        let envelope: ApiResponse<Value> = decode_envelope(reply.body, FAILURE);
        normalize_generated(request.kind, envelope)
    }

    fn generate_summary(&self, id: &str) -> ApiResponse<SummaryResponse> {
        self.exchange(
            Method::Post,
            &format!("/api/content/{}/summary", id),
            NO_BODY,
            "Failed to generate summary",
        )
    }

    fn generate_quiz(&self, id: &str) -> ApiResponse<QuizResponse> {
        self.exchange(
            Method::Post,
            &format!("/api/content/{}/quiz", id),
            NO_BODY,
            "Failed to generate quiz",
        )
    }

    fn categorize_content(&self, id: &str) -> ApiResponse<CategorizeResponse> {
        self.exchange(
            Method::Post,
            &format!("/api/content/{}/categorize", id),
            NO_BODY,
            "Failed to categorize content",
        )
    }
}
