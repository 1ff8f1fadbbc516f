use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::http::{decode_envelope, ApiClient, Method, Transport, NO_BODY};
use super::ApiResponse;
use crate::model::{CreateSemesterRequest, CreateSubjectRequest, Semester, Subject};

/// Semester and subject endpoints. Unlike the content endpoints these treat
/// any non-2xx reply as a failure, whatever its body says.
pub trait CatalogService {
    fn list_semesters(&self) -> ApiResponse<Vec<Semester>>;
    fn create_semester(&self, request: &CreateSemesterRequest) -> ApiResponse<Value>;
    fn list_subjects(&self) -> ApiResponse<Vec<Subject>>;
    fn create_subject(&self, request: &CreateSubjectRequest) -> ApiResponse<Value>;
}

impl<T: Transport> ApiClient<T> {
    fn catalog_call<B, D>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        failure: &str,
    ) -> ApiResponse<D>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        match self.send(method, path, body) {
            Ok(reply) if reply.is_success() => {
                // a 2xx reply without a success flag still counts as success
                let implicit = reply.body.get("success").is_none();
                let mut envelope: ApiResponse<D> = decode_envelope(reply.body, failure);
                if implicit && envelope.error.is_none() {
                    envelope.success = true;
                }
                envelope
            }
            Ok(reply) => {
                tracing::warn!(path, status = reply.status, "{}", failure);
                ApiResponse::failure(failure)
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "{}", failure);
                ApiResponse::failure(failure)
            }
        }
    }
}

impl<T: Transport> CatalogService for ApiClient<T> {
    fn list_semesters(&self) -> ApiResponse<Vec<Semester>> {
        self.catalog_call(Method::Get, "/semester", NO_BODY, "Error fetching semesters")
    }

    fn create_semester(&self, request: &CreateSemesterRequest) -> ApiResponse<Value> {
        self.catalog_call(
            Method::Post,
            "/semester",
            Some(request),
            "Failed to create semester",
        )
    }

    fn list_subjects(&self) -> ApiResponse<Vec<Subject>> {
        self.catalog_call(Method::Get, "/subject", NO_BODY, "Error fetching subjects")
    }

    fn create_subject(&self, request: &CreateSubjectRequest) -> ApiResponse<Value> {
        self.catalog_call(
            Method::Post,
            "/subject",
            Some(request),
            "Failed to create subject",
        )
    }
}
