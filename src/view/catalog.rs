use serde_json::Value;

use super::forms::FormError;
use crate::api::{ApiResponse, CatalogService};
use crate::model::{CreateSemesterRequest, CreateSubjectRequest, Semester, Subject};

/// A record kind listed and created through the catalog endpoints.
pub trait CatalogEntry: Sized {
    type Create;

    const FETCH_ERROR: &'static str;
    const CREATE_ERROR: &'static str;
    const CREATED: &'static str;

    fn list<A: CatalogService + ?Sized>(api: &A) -> ApiResponse<Vec<Self>>;
    fn create<A: CatalogService + ?Sized>(api: &A, request: &Self::Create) -> ApiResponse<Value>;
}

impl CatalogEntry for Semester {
    type Create = CreateSemesterRequest;

    const FETCH_ERROR: &'static str = "Error fetching semesters";
    const CREATE_ERROR: &'static str = "Failed to create semester";
    const CREATED: &'static str = "Semester created";

    fn list<A: CatalogService + ?Sized>(api: &A) -> ApiResponse<Vec<Self>> {
        api.list_semesters()
    }

    fn create<A: CatalogService + ?Sized>(api: &A, request: &Self::Create) -> ApiResponse<Value> {
        api.create_semester(request)
    }
}

impl CatalogEntry for Subject {
    type Create = CreateSubjectRequest;

    const FETCH_ERROR: &'static str = "Error fetching subjects";
    const CREATE_ERROR: &'static str = "Failed to create subject";
    const CREATED: &'static str = "Subject created";

    fn list<A: CatalogService + ?Sized>(api: &A) -> ApiResponse<Vec<Self>> {
        api.list_subjects()
    }

    fn create<A: CatalogService + ?Sized>(api: &A, request: &Self::Create) -> ApiResponse<Value> {
        api.create_subject(request)
    }
}

/// State behind the semester and subject screens. A successful create
/// re-fetches the list rather than patching it.
#[derive(Debug)]
pub struct CatalogBoard<E> {
    entries: Vec<E>,
    error: Option<String>,
    notice: Option<String>,
}

impl<E> Default for CatalogBoard<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            error: None,
            notice: None,
        }
    }
}

impl<E: CatalogEntry> CatalogBoard<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Keeps the previous list when the fetch fails.
    pub fn load<A: CatalogService + ?Sized>(&mut self, api: &A) -> bool {
        self.error = None;
        let ApiResponse {
            data,
            error,
            message,
            ..
        } = E::list(api);
        match data {
            Some(entries) => {
                self.entries = entries;
                true
            }
            None => {
                let message = error.or(message).unwrap_or_else(|| E::FETCH_ERROR.to_string());
                tracing::warn!(error = %message, "catalog fetch failed");
                self.error = Some(message);
                false
            }
        }
    }

    pub fn create<A: CatalogService + ?Sized>(
        &mut self,
        api: &A,
        request: Result<E::Create, FormError>,
    ) -> bool {
        self.error = None;
        self.notice = None;

        let request = match request {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.to_string());
                return false;
            }
        };

        let response = E::create(api, &request);
        if !response.success {
            let message = response.error_message().unwrap_or(E::CREATE_ERROR);
            tracing::warn!(error = %message, "catalog create failed");
            self.error = Some(message.to_string());
            return false;
        }

        self.notice = Some(E::CREATED.to_string());
        self.load(api)
    }
}
