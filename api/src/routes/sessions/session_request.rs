use pdf_tools::UploadedFile;
use serde::Deserialize;

/// Body of `PUT /sessions/{id}/locale`.
#[derive(Debug, Deserialize)]
pub struct SetLocaleRequest {
    /// `ar` or `en`.
    pub lang: String,
}

/// Body of `PUT /sessions/{id}/tool`.
#[derive(Debug, Deserialize)]
pub struct SelectToolRequest {
    /// Tool id such as `merge` or `ai-chat`.
    pub tool: String,
}

/// Body of `PUT /sessions/{id}/files`. Only metadata travels; no file bytes.
#[derive(Debug, Deserialize)]
pub struct AttachFilesRequest {
    pub files: Vec<UploadedFile>,
}

/// Body of `POST /sessions/{id}/chat`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
}
