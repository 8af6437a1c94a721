use serde::Serialize;
use thiserror::Error;

use crate::models::TextReviewRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please either upload a file or provide both filename and code content.")]
    MissingInput,
    #[error("Please provide code content to review.")]
    EmptyContent,
}

/// A file picked in the upload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// What actually gets sent for review. The two modes are never mixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    File { filename: String, bytes: Vec<u8> },
    Text(TextReviewRequest),
}

impl Submission {
    pub fn filename(&self) -> &str {
        match self {
            Submission::File { filename, .. } => filename,
            Submission::Text(request) => &request.filename,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    file: Option<SelectedFile>,
    pub filename: String,
    pub code: String,
}

impl FormState {
    /// Attaches a file and copies its name and text into the editable fields.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.filename = file.name.clone();
        self.code = file.text();
        self.file = Some(file);
    }

    pub fn set_text(&mut self, filename: impl Into<String>, code: impl Into<String>) {
        self.filename = filename.into();
        self.code = code.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resolves the form into a single submission. An attached file wins over
    /// the typed fields.
    pub fn to_submission(&self) -> Result<Submission, ValidationError> {
        if let Some(file) = &self.file {
            if file.text().trim().is_empty() {
                return Err(ValidationError::EmptyContent);
            }
            return Ok(Submission::File {
                filename: file.name.clone(),
                bytes: file.bytes.clone(),
            });
        }

        let filename = self.filename.trim();
        let content = self.code.trim();
        if filename.is_empty() || content.is_empty() {
            return Err(ValidationError::MissingInput);
        }

        Ok(Submission::Text(TextReviewRequest {
            filename: filename.to_string(),
            content: content.to_string(),
        }))
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            attached_file: self.file.as_ref().map(|f| f.name.clone()),
            filename: self.filename.clone(),
            code: self.code.clone(),
        }
    }
}

/// Template-facing copy of the form fields.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub attached_file: Option<String>,
    pub filename: String,
    pub code: String,
}
