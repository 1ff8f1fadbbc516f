mod catalog;
mod content;
mod generation;

pub use catalog::{CreateSemesterRequest, CreateSubjectRequest, Semester, Subject};
pub use content::{Content, ContentType, CreateContentRequest, UpdateContentRequest};
pub use generation::{
    AiKind, AiOptions, AiResult, AiServiceRequest, CategorizeResponse, Difficulty, QuizQuestion,
    QuizResponse, SummaryResponse,
};
