use std::collections::HashSet;

use super::forms::FormOutcome;
use crate::api::{ApiResponse, ContentService};
use crate::model::{AiKind, AiResult, Content, CreateContentRequest, UpdateContentRequest};

/// State behind the content management screen.
///
/// Writes mutate the local collection in place once the backend confirms
/// them; a failed write leaves the collection alone and sets the error
/// banner. Busy flags are per row: an action on one row never waits on
/// another.
#[derive(Debug, Default)]
pub struct ContentBoard {
    items: Vec<Content>,
    loading: bool,
    submitting: bool,
    deleting: HashSet<String>,
    processing: HashSet<String>,
    pending_delete: Option<String>,
    editing: Option<Content>,
    ai_result: Option<AiResult>,
    error: Option<String>,
}

impl ContentBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Content] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.deleting.contains(id)
    }

    pub fn is_processing(&self, id: &str) -> bool {
        self.processing.contains(id)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn editing(&self) -> Option<&Content> {
        self.editing.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn ai_result(&self) -> Option<&AiResult> {
        self.ai_result.as_ref()
    }

    /// Closes the AI results dialog.
    pub fn take_ai_result(&mut self) -> Option<AiResult> {
        self.ai_result.take()
    }

    pub fn find(&self, id: &str) -> Option<&Content> {
        self.items.iter().find(|c| c.id == id)
    }

    fn settle<T>(&mut self, response: ApiResponse<T>, default_error: &str) -> Option<T> {
        match response.into_result(default_error) {
            Ok(data) => Some(data),
            Err(message) => {
                tracing::warn!(error = %message, "content action failed");
                self.error = Some(message);
                None
            }
        }
    }

    pub fn load(&mut self, api: &impl ContentService) -> bool {
        self.loading = true;
        self.error = None;
        let response = api.list_content();
        self.loading = false;

        match self.settle(response, "Failed to load content") {
            Some(items) => {
                self.items = items;
                true
            }
            None => false,
        }
    }

    pub fn create(
        &mut self,
        api: &impl ContentService,
        outcome: FormOutcome<CreateContentRequest>,
    ) -> Option<&Content> {
        let FormOutcome::Submitted(request) = outcome else {
            return None;
        };

        self.submitting = true;
        self.error = None;
        let response = api.create_content(&request);
        self.submitting = false;

        let created = self.settle(response, "Failed to create content")?;
        apply_created(&mut self.items, created);
        self.items.last()
    }

    /// Opens the edit form for a row in the collection.
    pub fn start_edit(&mut self, id: &str) -> Option<&Content> {
        self.editing = self.find(id).cloned();
        self.editing.as_ref()
    }

    /// Closes the edit form. A cancelled form makes no call.
    pub fn submit_edit(
        &mut self,
        api: &impl ContentService,
        outcome: FormOutcome<UpdateContentRequest>,
    ) -> bool {
        let request = match outcome {
            FormOutcome::Submitted(request) => request,
            FormOutcome::Cancelled => {
                self.editing = None;
                return false;
            }
        };
        let Some(id) = self.editing.as_ref().map(|c| c.id.clone()) else {
            return false;
        };

        self.submitting = true;
        self.error = None;
        let response = api.update_content(&id, &request);
        self.submitting = false;

        match self.settle(response, "Failed to update content") {
            Some(updated) => {
                apply_updated(&mut self.items, &id, updated);
                self.editing = None;
                true
            }
            None => false,
        }
    }

    /// Opens the confirm dialog for a delete.
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Deletes the row the confirm dialog was opened for.
    pub fn confirm_delete(&mut self, api: &impl ContentService) -> bool {
        match self.pending_delete.take() {
            Some(id) => self.delete(api, &id),
            None => false,
        }
    }

    /// Marks a row as being deleted. Fails if a delete of that row is
    /// already in flight.
    pub fn begin_delete(&mut self, id: &str) -> bool {
        self.deleting.insert(id.to_string())
    }

    pub fn finish_delete<T>(&mut self, id: &str, response: ApiResponse<T>) -> bool {
        self.deleting.remove(id);
        if response.success {
            apply_deleted(&mut self.items, id);
            true
        } else {
            self.settle(response, "Failed to delete content");
            false
        }
    }

    pub fn delete(&mut self, api: &impl ContentService, id: &str) -> bool {
        if !self.begin_delete(id) {
            tracing::debug!(id, "delete already in flight");
            return false;
        }
        self.error = None;
        let response = api.delete_content(id);
        self.finish_delete(id, response)
    }

    /// Marks a row as busy with an AI action. Fails if that row is already
    /// being processed.
    pub fn begin_processing(&mut self, id: &str) -> bool {
        self.processing.insert(id.to_string())
    }

    pub fn finish_processing(
        &mut self,
        id: &str,
        kind: AiKind,
        response: ApiResponse<AiResult>,
    ) -> Option<&AiResult> {
        self.processing.remove(id);
        let result = self.settle(response, default_ai_error(kind))?;
        self.ai_result = Some(result);
        self.ai_result.as_ref()
    }

    /// Runs summary, quiz or categorize generation for an existing row.
    pub fn process(
        &mut self,
        api: &impl ContentService,
        id: &str,
        kind: AiKind,
    ) -> Option<&AiResult> {
        if !self.begin_processing(id) {
            tracing::debug!(id, %kind, "AI action already in flight");
            return None;
        }
        self.error = None;

        let response = match kind {
            AiKind::Summary => api.generate_summary(id).map(AiResult::from),
            AiKind::Quiz => api.generate_quiz(id).map(AiResult::from),
            AiKind::Categorize => api.categorize_content(id).map(AiResult::from),
        };
        self.finish_processing(id, kind, response)
    }
}

fn default_ai_error(kind: AiKind) -> &'static str {
    match kind {
        AiKind::Summary => "Failed to generate summary",
        AiKind::Quiz => "Failed to generate quiz",
        AiKind::Categorize => "Failed to categorize content",
    }
}

fn apply_created(items: &mut Vec<Content>, created: Content) {
    items.push(created);
}

fn apply_updated(items: &mut [Content], id: &str, updated: Content) {
    if let Some(slot) = items.iter_mut().find(|c| c.id == id) {
        *slot = updated;
    }
}

fn apply_deleted(items: &mut Vec<Content>, id: &str) {
    items.retain(|c| c.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        AiServiceRequest, CategorizeResponse, ContentType, QuizResponse, SummaryResponse,
    };
    use crate::view::forms::ContentForm;
    use serde_json::Value;
    use std::cell::RefCell;

    fn content(id: &str, title: &str) -> Content {
        Content {
            id: id.into(),
            title: title.into(),
            content: format!("{} body", title),
            content_type: ContentType::Text,
            category: None,
            created_at: "2024-03-01".into(),
        }
    }

    /// Records every call and answers from canned data.
    #[derive(Default)]
    struct FakeContent {
        calls: RefCell<Vec<String>>,
        items: Vec<Content>,
        fail_writes: bool,
    }

    impl FakeContent {
        fn with(items: Vec<Content>) -> Self {
            Self {
                items,
                ..Default::default()
            }
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn write<T>(&self, data: T) -> ApiResponse<T> {
            if self.fail_writes {
                ApiResponse::failure("backend said no")
            } else {
                ApiResponse::ok(data)
            }
        }
    }

    impl ContentService for FakeContent {
        fn list_content(&self) -> ApiResponse<Vec<Content>> {
            self.record("list".into());
            ApiResponse::ok(self.items.clone())
        }

        fn get_content(&self, id: &str) -> ApiResponse<Content> {
            self.record(format!("get {}", id));
            match self.items.iter().find(|c| c.id == id) {
                Some(c) => ApiResponse::ok(c.clone()),
                None => ApiResponse::failure("Content not found"),
            }
        }

        fn create_content(&self, request: &CreateContentRequest) -> ApiResponse<Content> {
            self.record(format!("create {}", request.title));
            self.write(content("new-1", &request.title))
        }

        fn update_content(&self, id: &str, request: &UpdateContentRequest) -> ApiResponse<Content> {
            self.record(format!("update {}", id));
            let title = request.title.clone().unwrap_or_default();
            self.write(content(id, &title))
        }

        fn delete_content(&self, id: &str) -> ApiResponse<Value> {
            self.record(format!("delete {}", id));
            self.write(Value::Null)
        }

        fn generate_content(&self, request: &AiServiceRequest) -> ApiResponse<AiResult> {
            self.record(format!("generate {}", request.kind));
            ApiResponse::failure("not used")
        }

        fn generate_summary(&self, id: &str) -> ApiResponse<SummaryResponse> {
            self.record(format!("summary {}", id));
            ApiResponse::ok(SummaryResponse {
                summary: "short".into(),
                key_points: vec!["one".into()],
                word_count: 1.0,
            })
        }

        fn generate_quiz(&self, id: &str) -> ApiResponse<QuizResponse> {
            self.record(format!("quiz {}", id));
            ApiResponse::failure("quiz service down")
        }

        fn categorize_content(&self, id: &str) -> ApiResponse<CategorizeResponse> {
            self.record(format!("categorize {}", id));
            ApiResponse {
                success: false,
                data: None,
                error: None,
                message: None,
            }
        }
    }

    fn loaded(api: &FakeContent) -> ContentBoard {
        let mut board = ContentBoard::new();
        assert!(board.load(api));
        board
    }

    #[test]
    fn load_replaces_collection() {
        let api = FakeContent::with(vec![content("a", "A"), content("b", "B")]);
        let board = loaded(&api);
        assert_eq!(board.items().len(), 2);
        assert!(!board.is_loading());
        assert_eq!(board.error(), None);
    }

    #[test]
    fn create_appends_exactly_one() {
        let api = FakeContent::with(vec![content("a", "A")]);
        let mut board = loaded(&api);
        let before = board.items().to_vec();

        let mut form = ContentForm::create();
        form.title = "Traits".into();
        form.content = "Shared behavior".into();
        let created = board.create(&api, form.submit_create().unwrap()).cloned();

        assert_eq!(created.map(|c| c.id), Some("new-1".to_string()));
        assert_eq!(&board.items()[..1], &before[..]);
        assert_eq!(board.items().len(), before.len() + 1);
    }

    #[test]
    fn update_replaces_by_id_only() {
        let api = FakeContent::with(vec![content("a", "A"), content("b", "B"), content("c", "C")]);
        let mut board = loaded(&api);

        board.start_edit("b");
        let mut form = ContentForm::edit(board.editing().unwrap());
        form.title = "B2".into();
        assert!(board.submit_edit(&api, form.submit_update().unwrap()));

        let titles: Vec<&str> = board.items().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B2", "C"]);
        assert!(board.editing().is_none());
    }

    #[test]
    fn delete_removes_by_id_only() {
        let api = FakeContent::with(vec![content("a", "A"), content("b", "B")]);
        let mut board = loaded(&api);

        assert!(board.delete(&api, "a"));
        let ids: Vec<&str> = board.items().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert!(!board.is_deleting("a"));
    }

    #[test]
    fn failed_write_keeps_collection_and_sets_error() {
        let mut api = FakeContent::with(vec![content("a", "A")]);
        let mut board = loaded(&api);
        api.fail_writes = true;

        assert!(!board.delete(&api, "a"));
        assert_eq!(board.items().len(), 1);
        assert_eq!(board.error(), Some("backend said no"));
    }

    #[test]
    fn cancelled_edit_makes_no_call() {
        let api = FakeContent::with(vec![content("a", "A")]);
        let mut board = loaded(&api);

        board.start_edit("a");
        let form = ContentForm::edit(board.editing().unwrap());
        assert!(!board.submit_edit(&api, form.cancel()));

        assert_eq!(*api.calls.borrow(), vec!["list".to_string()]);
        assert!(board.editing().is_none());
    }

    #[test]
    fn delete_waits_for_confirmation() {
        let api = FakeContent::with(vec![content("a", "A")]);
        let mut board = loaded(&api);

        board.request_delete("a");
        assert_eq!(board.pending_delete(), Some("a"));
        board.dismiss_delete();
        assert!(!board.confirm_delete(&api));
        assert_eq!(board.items().len(), 1);

        board.request_delete("a");
        assert!(board.confirm_delete(&api));
        assert!(board.items().is_empty());
    }

    #[test]
    fn delete_on_one_row_does_not_touch_processing_on_another() {
        let api = FakeContent::with(vec![content("abc", "A"), content("xyz", "X")]);
        let mut board = loaded(&api);

        assert!(board.begin_processing("xyz"));
        assert!(board.delete(&api, "abc"));
        assert!(board.is_processing("xyz"));

        let summary = api.generate_summary("xyz").map(AiResult::from);
        assert!(board
            .finish_processing("xyz", AiKind::Summary, summary)
            .is_some());
        assert!(!board.is_processing("xyz"));
        assert_eq!(board.items().len(), 1);
    }

    #[test]
    fn repeated_action_on_busy_row_is_rejected() {
        let api = FakeContent::with(vec![content("a", "A")]);
        let mut board = loaded(&api);

        assert!(board.begin_processing("a"));
        assert!(board.process(&api, "a", AiKind::Summary).is_none());
        assert!(board.begin_delete("a"));
        assert!(!board.delete(&api, "a"));

        assert_eq!(*api.calls.borrow(), vec!["list".to_string()]);
    }

    #[test]
    fn ai_errors_fall_back_to_action_message() {
        let api = FakeContent::with(vec![content("a", "A")]);
        let mut board = loaded(&api);

        assert!(board.process(&api, "a", AiKind::Quiz).is_none());
        assert_eq!(board.error(), Some("quiz service down"));

        assert!(board.process(&api, "a", AiKind::Categorize).is_none());
        assert_eq!(board.error(), Some("Failed to categorize content"));

        assert!(board.process(&api, "a", AiKind::Summary).is_some());
        assert_eq!(board.error(), None);
        assert!(matches!(board.take_ai_result(), Some(AiResult::Summary(_))));
        assert!(board.ai_result().is_none());
    }
}
