mod auth;
mod catalog;
mod content;
mod envelope;
mod http;

pub use auth::{AuthError, AuthService};
pub use catalog::CatalogService;
pub use content::ContentService;
pub use envelope::ApiResponse;
pub use http::{ApiClient, HttpReply, HttpRequest, Method, RequestError, Transport, UreqTransport};
