use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pdf_tools::ToolError;
use thiserror::Error;
use tracing::error;

use crate::core::{
    app_state::ConfigError,
    http::response_envelope::{ApiErrorDetail, ApiResponse},
};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
        hint: Option<(&'static str, &'static str)>,
    },
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Http { status, .. } => *status,
            // startup-only
            Self::Config(_) | Self::Bind(_) | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Bind(_) => "BIND_ERROR",
            Self::Server(_) => "SERVER_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Http { code, .. } => code,
        }
    }

    fn http(status: StatusCode, code: &'static str, err: &ToolError) -> Self {
        Self::Http {
            status,
            code,
            message: err.to_string(),
            hint: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let details = match &self {
            Self::Http {
                hint: Some((path, hint)),
                ..
            } => vec![ApiErrorDetail::field(*path).with_hint(*hint)],
            _ => Vec::new(),
        };
        ApiResponse::<()>::error(self.error_code(), self.to_string(), details)
            .into_response_with_status(status)
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Maps session errors to precise HTTP statuses & codes.
impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        use StatusCode as S;
        match &err {
            ToolError::SessionNotFound(_) => Self::http(S::NOT_FOUND, "SESSION_NOT_FOUND", &err),
            ToolError::NoArtifact => Self::http(S::NOT_FOUND, "NO_ARTIFACT", &err),
            ToolError::Busy => Self::Http {
                status: S::CONFLICT,
                code: "REQUEST_IN_FLIGHT",
                message: err.to_string(),
                hint: Some(("session", "Wait for the current request to finish.")),
            },
            ToolError::UnknownTool(_) => Self::http(S::BAD_REQUEST, "UNKNOWN_TOOL", &err),
            ToolError::NoToolSelected => Self::http(S::BAD_REQUEST, "NO_TOOL_SELECTED", &err),
            ToolError::NoFiles => Self::Http {
                status: S::BAD_REQUEST,
                code: "NO_FILES",
                message: err.to_string(),
                hint: Some(("files", "Attach at least one .pdf, .doc or .docx file.")),
            },
            ToolError::TooManyFiles { .. } => Self::Http {
                status: S::BAD_REQUEST,
                code: "TOO_MANY_FILES",
                message: err.to_string(),
                hint: Some(("files", "Only the merge tool accepts several files.")),
            },
            ToolError::UnsupportedFile { .. } => Self::http(S::BAD_REQUEST, "UNSUPPORTED_FILE", &err),
            ToolError::EmptyFileName => Self::http(S::BAD_REQUEST, "EMPTY_FILE_NAME", &err),
            ToolError::ChatOnlyTool(_) => Self::http(S::BAD_REQUEST, "CHAT_ONLY_TOOL", &err),
            ToolError::NotAChatTool(_) => Self::http(S::BAD_REQUEST, "NOT_A_CHAT_TOOL", &err),
            ToolError::EmptyQuery => Self::Http {
                status: S::BAD_REQUEST,
                code: "EMPTY_QUERY",
                message: err.to_string(),
                hint: Some(("query", "Type a question about the document.")),
            },
        }
    }
}
