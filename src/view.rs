mod board;
mod catalog;
mod export;
mod forms;
mod generate;
mod login;
pub mod render;

pub use board::ContentBoard;
pub use catalog::{CatalogBoard, CatalogEntry};
pub use export::{content_file_name, serialize_content, write_ai_result, write_content};
pub use forms::{AiContentForm, ContentForm, FormError, FormOutcome, SemesterForm, SubjectForm};
pub use generate::GenerationPage;
pub use login::LoginScreen;
