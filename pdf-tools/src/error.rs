//! Error type for tool-session operations.
//!
//! Completion-service failures never show up here: the assistant replaces
//! them with localized text before they reach a session.

use thiserror::Error;

use crate::catalog::ToolKind;

pub type ToolResult<T> = Result<T, ToolError>;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("no tool selected")]
    NoToolSelected,

    #[error("no files attached")]
    NoFiles,

    #[error("{tool} accepts a single file, got {count}")]
    TooManyFiles { tool: ToolKind, count: usize },

    #[error("unsupported file type: {name} (accepted: .pdf, .doc, .docx)")]
    UnsupportedFile { name: String },

    #[error("file name must not be empty")]
    EmptyFileName,

    #[error("{0} is a chat tool; send a chat message instead")]
    ChatOnlyTool(ToolKind),

    #[error("chat is only available for the ai-chat tool (selected: {0})")]
    NotAChatTool(ToolKind),

    #[error("chat message must not be empty")]
    EmptyQuery,

    /// Another request from this session is still in flight.
    #[error("a request is already in progress for this session")]
    Busy,

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("nothing to download yet")]
    NoArtifact,
}
