use thiserror::Error;

use crate::model::{
    AiKind, AiOptions, AiServiceRequest, Content, ContentType, CreateContentRequest,
    CreateSemesterRequest, CreateSubjectRequest, Difficulty, UpdateContentRequest,
};

/// What a form hands back when it closes.
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome<T> {
    Submitted(T),
    Cancelled,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FormError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FormError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn require(field: &'static str, value: &str, message: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::new(field, message));
    }
    Ok(())
}

fn min_len(
    field: &'static str,
    value: &str,
    min: usize,
    message: &'static str,
) -> Result<(), FormError> {
    if value.chars().count() < min {
        return Err(FormError::new(field, message));
    }
    Ok(())
}

/// Create or edit form for a content record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentForm {
    pub title: String,
    pub content: String,
    pub content_type: ContentType,
    pub category: String,
    editing: Option<String>,
}

impl ContentForm {
    pub fn create() -> Self {
        Self::default()
    }

    /// Pre-populated from an existing record.
    pub fn edit(content: &Content) -> Self {
        Self {
            title: content.title.clone(),
            content: content.content.clone(),
            content_type: content.content_type,
            category: content.category.clone().unwrap_or_default(),
            editing: Some(content.id.clone()),
        }
    }

    /// Id of the record being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require("title", &self.title, "Title is required")?;
        require("content", &self.content, "Content is required")
    }

    pub fn submit_create(&self) -> Result<FormOutcome<CreateContentRequest>, FormError> {
        self.validate()?;
        Ok(FormOutcome::Submitted(CreateContentRequest {
            title: self.title.clone(),
            content: self.content.clone(),
            content_type: self.content_type,
            category: Some(self.category.clone()).filter(|c| !c.is_empty()),
        }))
    }

    /// Edits replace the record wholesale, so every field is sent.
    pub fn submit_update(&self) -> Result<FormOutcome<UpdateContentRequest>, FormError> {
        self.validate()?;
        Ok(FormOutcome::Submitted(UpdateContentRequest {
            title: Some(self.title.clone()),
            content: Some(self.content.clone()),
            content_type: Some(self.content_type),
            category: Some(self.category.clone()),
        }))
    }

    pub fn cancel<T>(&self) -> FormOutcome<T> {
        FormOutcome::Cancelled
    }
}

pub const DEFAULT_MAX_LENGTH: u32 = 500;
pub const DEFAULT_NUM_QUESTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct AiContentForm {
    pub content: String,
    pub kind: AiKind,
    pub max_length: u32,
    pub difficulty: Difficulty,
    pub num_questions: u32,
}

impl Default for AiContentForm {
    fn default() -> Self {
        Self {
            content: String::new(),
            kind: AiKind::Summary,
            max_length: DEFAULT_MAX_LENGTH,
            difficulty: Difficulty::Medium,
            num_questions: DEFAULT_NUM_QUESTIONS,
        }
    }
}

impl AiContentForm {
    pub fn submit(&self) -> Result<AiServiceRequest, FormError> {
        require("content", &self.content, "Content is required")?;
        Ok(AiServiceRequest {
            content: self.content.clone(),
            kind: self.kind,
            options: AiOptions {
                max_length: Some(self.max_length),
                difficulty: Some(self.difficulty),
                num_questions: Some(self.num_questions),
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SemesterForm {
    pub name: String,
    pub code: String,
}

impl SemesterForm {
    pub fn submit(&self) -> Result<CreateSemesterRequest, FormError> {
        min_len("name", &self.name, 2, "Name is too short")?;
        min_len("code", &self.code, 2, "Code is too short")?;
        Ok(CreateSemesterRequest {
            name: self.name.clone(),
            code: self.code.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubjectForm {
    pub name: String,
    pub code: String,
    pub semester_id: String,
}

impl SubjectForm {
    pub fn submit(&self) -> Result<CreateSubjectRequest, FormError> {
        min_len(
            "name",
            &self.name,
            2,
            "Subject name must be at least 2 characters long",
        )?;
        min_len(
            "code",
            &self.code,
            3,
            "Subject code must be at least 3 characters long",
        )?;
        require("semesterId", &self.semester_id, "Semester ID is required")?;
        Ok(CreateSubjectRequest {
            name: self.name.clone(),
            code: self.code.clone(),
            semester_id: self.semester_id.clone(),
        })
    }
}
