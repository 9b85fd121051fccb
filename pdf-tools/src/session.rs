//! Per-user tool session: selected tool, picked files, last result and chat
//! transcript.
//!
//! Each session owns a single in-flight permit. `process` and `send_chat`
//! take it with `try_acquire`, so a second request from the same session
//! fails fast with [`ToolError::Busy`] instead of queuing behind the first.
//!
//! View changes (switching tool, re-picking files, going back) bump an epoch;
//! a result that arrives for an older epoch is returned to its caller but not
//! stored in the session.
//!
//! Sessions record when they were last used so the store can evict idle ones.

use std::{
    fmt,
    str::FromStr,
    sync::{Arc, Mutex},
    time::Duration,
};

use ai_gateway::{Direction, DocumentAssistant, Locale};
use serde::Serialize;
use tokio::{
    sync::{RwLock, Semaphore},
    time::Instant,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    catalog::{ToolDescriptor, ToolKind},
    error::{ToolError, ToolResult},
    messages::Messages,
    processor::{PlaceholderArtifact, SimulatedProcessor},
    upload::{UploadedFile, validate_selection},
};

/// Opaque session identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ToolError::SessionNotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Ai,
            text: text.into(),
        }
    }
}

/// Outcome of [`ToolSession::process`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    /// Text produced by the summarize tool (or its localized fallback).
    Summary { heading: &'static str, text: String },
    /// Placeholder download produced by a simulated tool.
    Artifact(PlaceholderArtifact),
}

/// File as listed in the session view.
#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub name: String,
    pub size_bytes: u64,
    pub size_label: String,
}

impl From<&UploadedFile> for FileView {
    fn from(f: &UploadedFile) -> Self {
        Self {
            name: f.name.clone(),
            size_bytes: f.size_bytes,
            size_label: f.size_label(),
        }
    }
}

/// Read-only view of a session, serialized straight to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub locale: Locale,
    pub direction: Direction,
    pub tool: Option<ToolDescriptor>,
    pub files: Vec<FileView>,
    pub result: Option<ToolOutput>,
    pub chat_history: Vec<ChatMessage>,
    pub processing: bool,
    /// UI strings for `locale`.
    pub messages: &'static Messages,
}

#[derive(Debug, Default)]
struct SessionState {
    locale: Locale,
    tool: Option<ToolKind>,
    files: Vec<UploadedFile>,
    result: Option<ToolOutput>,
    chat_history: Vec<ChatMessage>,
    epoch: u64,
}

impl SessionState {
    fn reset_view(&mut self) {
        self.files.clear();
        self.result = None;
        self.chat_history.clear();
        self.epoch += 1;
    }
}

pub struct ToolSession {
    id: SessionId,
    state: RwLock<SessionState>,
    in_flight: Semaphore,
    last_active: Mutex<Instant>,
    assistant: Arc<DocumentAssistant>,
    processor: SimulatedProcessor,
}

impl fmt::Debug for ToolSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSession")
            .field("id", &self.id)
            .field("processing", &self.is_processing())
            .finish_non_exhaustive()
    }
}

impl ToolSession {
    pub fn new(
        locale: Locale,
        assistant: Arc<DocumentAssistant>,
        processor: SimulatedProcessor,
    ) -> Self {
        Self {
            id: SessionId::new(),
            state: RwLock::new(SessionState {
                locale,
                ..SessionState::default()
            }),
            in_flight: Semaphore::new(1),
            last_active: Mutex::new(Instant::now()),
            assistant,
            processor,
        }
    }

    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// True while a `process` or `send_chat` call holds the permit.
    pub fn is_processing(&self) -> bool {
        self.in_flight.available_permits() == 0
    }

    /// Marks the session as used now.
    pub fn touch(&self) {
        if let Ok(mut at) = self.last_active.lock() {
            *at = Instant::now();
        }
    }

    /// Time since the last [`touch`](Self::touch) (or creation).
    pub fn idle_for(&self) -> Duration {
        self.last_active
            .lock()
            .map(|at| at.elapsed())
            .unwrap_or_default()
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let st = self.state.read().await;
        SessionSnapshot {
            id: self.id,
            locale: st.locale,
            direction: st.locale.direction(),
            tool: st.tool.map(|t| t.descriptor(st.locale)),
            files: st.files.iter().map(FileView::from).collect(),
            result: st.result.clone(),
            chat_history: st.chat_history.clone(),
            processing: self.is_processing(),
            messages: Messages::for_locale(st.locale),
        }
    }

    pub async fn set_locale(&self, locale: Locale) {
        self.state.write().await.locale = locale;
    }

    /// Opens `tool`, discarding files, result and transcript of the previous view.
    pub async fn select_tool(&self, tool: ToolKind) {
        let mut st = self.state.write().await;
        st.tool = Some(tool);
        st.reset_view();
        debug!(session = %self.id, %tool, "tool selected");
    }

    /// Returns to the tool grid.
    pub async fn back_to_tools(&self) {
        let mut st = self.state.write().await;
        st.tool = None;
        st.reset_view();
    }

    /// Replaces the picked files and clears the previous result.
    ///
    /// # Errors
    /// [`ToolError::NoToolSelected`] or any error of [`validate_selection`].
    pub async fn attach_files(&self, files: Vec<UploadedFile>) -> ToolResult<()> {
        let mut st = self.state.write().await;
        let tool = st.tool.ok_or(ToolError::NoToolSelected)?;
        if let Err(e) = validate_selection(tool, &files) {
            warn!(session = %self.id, %tool, error = %e, "file selection rejected");
            return Err(e);
        }
        st.files = files;
        st.result = None;
        st.epoch += 1;
        Ok(())
    }

    /// Cancels the current file selection.
    pub async fn clear_files(&self) {
        let mut st = self.state.write().await;
        st.files.clear();
        st.result = None;
        st.epoch += 1;
    }

    /// Runs the selected tool on the picked files.
    ///
    /// `ai-summarize` goes through the assistant; the conversion tools are
    /// simulated. Assistant failures come back as localized text, not errors.
    ///
    /// # Errors
    /// - [`ToolError::Busy`] while another request of this session is running
    /// - [`ToolError::NoToolSelected`], [`ToolError::NoFiles`]
    /// - [`ToolError::ChatOnlyTool`] for `ai-chat`
    pub async fn process(&self) -> ToolResult<ToolOutput> {
        let _permit = self.in_flight.try_acquire().map_err(|_| ToolError::Busy)?;

        let (tool, files, locale, epoch) = {
            let st = self.state.read().await;
            let tool = st.tool.ok_or(ToolError::NoToolSelected)?;
            if tool == ToolKind::AiChat {
                return Err(ToolError::ChatOnlyTool(tool));
            }
            if st.files.is_empty() {
                return Err(ToolError::NoFiles);
            }
            (tool, st.files.clone(), st.locale, st.epoch)
        };

        info!(session = %self.id, %tool, files = files.len(), "processing started");

        let messages = Messages::for_locale(locale);
        let output = if tool == ToolKind::AiSummarize {
            let text = self
                .assistant
                .summarize(&files[0].name, messages.summarize_description, locale)
                .await;
            ToolOutput::Summary {
                heading: messages.summary_ready,
                text,
            }
        } else {
            ToolOutput::Artifact(self.processor.run(tool, &files, locale).await)
        };

        let mut st = self.state.write().await;
        if st.epoch == epoch {
            st.result = Some(output.clone());
        } else {
            debug!(session = %self.id, %tool, "view changed while processing; result not stored");
        }
        Ok(output)
    }

    /// Sends one chat turn about the first picked file and returns the reply.
    ///
    /// The user message is appended before the assistant is called; the reply
    /// (or its localized fallback) is appended afterwards.
    ///
    /// # Errors
    /// - [`ToolError::EmptyQuery`] for a blank message
    /// - [`ToolError::Busy`] while another request of this session is running
    /// - [`ToolError::NoToolSelected`], [`ToolError::NotAChatTool`], [`ToolError::NoFiles`]
    pub async fn send_chat(&self, query: &str) -> ToolResult<ChatMessage> {
        if query.trim().is_empty() {
            return Err(ToolError::EmptyQuery);
        }
        let _permit = self.in_flight.try_acquire().map_err(|_| ToolError::Busy)?;

        let (file_name, locale, epoch) = {
            let mut st = self.state.write().await;
            let tool = st.tool.ok_or(ToolError::NoToolSelected)?;
            if tool != ToolKind::AiChat {
                return Err(ToolError::NotAChatTool(tool));
            }
            let file_name = st.files.first().ok_or(ToolError::NoFiles)?.name.clone();
            st.chat_history.push(ChatMessage::user(query));
            (file_name, st.locale, st.epoch)
        };

        let context = Messages::for_locale(locale).chat_context;
        let reply = ChatMessage::ai(self.assistant.chat(query, &file_name, context, locale).await);

        let mut st = self.state.write().await;
        if st.epoch == epoch {
            st.chat_history.push(reply.clone());
        } else {
            debug!(session = %self.id, "view changed while chatting; reply not stored");
        }
        Ok(reply)
    }

    /// Placeholder download of the last simulated run.
    ///
    /// # Errors
    /// [`ToolError::NoArtifact`] when the session holds no artifact.
    pub async fn artifact(&self) -> ToolResult<PlaceholderArtifact> {
        match &self.state.read().await.result {
            Some(ToolOutput::Artifact(a)) => Ok(a.clone()),
            _ => Err(ToolError::NoArtifact),
        }
    }
}
