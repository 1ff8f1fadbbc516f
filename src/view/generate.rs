use super::forms::AiContentForm;
use crate::api::ContentService;
use crate::model::AiResult;

/// State behind the free-form AI generation screen.
#[derive(Debug, Default)]
pub struct GenerationPage {
    submitting: bool,
    error: Option<String>,
    result: Option<AiResult>,
}

impl GenerationPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&AiResult> {
        self.result.as_ref()
    }

    pub fn submit(&mut self, api: &impl ContentService, form: &AiContentForm) -> Option<&AiResult> {
        self.error = None;
        self.result = None;

        let request = match form.submit() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };

        self.submitting = true;
        let response = api.generate_content(&request);
        self.submitting = false;

        match response.into_result("Failed to generate content") {
            Ok(result) => {
                self.result = Some(result);
                self.result.as_ref()
            }
            Err(message) => {
                tracing::warn!(kind = %request.kind, error = %message, "generation failed");
                self.error = Some(message);
                None
            }
        }
    }
}
