//! Simulated processing for the conversion tools.
//!
//! Nothing here reads or writes document bytes: after a fixed delay the
//! processor hands back a small placeholder artifact that the UI offers as a
//! download.

use std::time::Duration;

use ai_gateway::Locale;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::{catalog::ToolKind, messages::Messages, upload::UploadedFile};

/// Delay used when none is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Stub output of a simulated tool.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    /// Localized "file is ready" message.
    pub message: &'static str,
    #[serde(skip)]
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}

impl SimulatedProcessor {
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Waits out the delay and returns the placeholder for `tool`.
    pub async fn run(
        &self,
        tool: ToolKind,
        files: &[UploadedFile],
        locale: Locale,
    ) -> PlaceholderArtifact {
        debug!(%tool, files = files.len(), delay_ms = self.delay.as_millis(), "simulating tool run");
        tokio::time::sleep(self.delay).await;

        let stem = files.first().map_or("document", UploadedFile::stem);
        let (file_name, content_type) = output_name(tool, stem);
        let body = Bytes::from(format!(
            "Placeholder output of `{tool}` for {} input file(s). No document content was processed.\n",
            files.len()
        ));

        info!(%tool, %file_name, "simulated tool run finished");

        PlaceholderArtifact {
            file_name,
            content_type,
            message: Messages::for_locale(locale).success,
            body,
        }
    }
}

fn output_name(tool: ToolKind, stem: &str) -> (String, &'static str) {
    const PDF: &str = "application/pdf";
    const ZIP: &str = "application/zip";
    match tool {
        ToolKind::Merge => ("merged.pdf".to_string(), PDF),
        ToolKind::Split => (format!("{stem}-split.zip"), ZIP),
        ToolKind::Compress => (format!("{stem}-compressed.pdf"), PDF),
        ToolKind::PdfToWord => (
            format!("{stem}.docx"),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
        ToolKind::WordToPdf => (format!("{stem}.pdf"), PDF),
        ToolKind::PdfToJpg => (format!("{stem}-pages.zip"), ZIP),
        ToolKind::AiSummarize | ToolKind::AiChat => (format!("{stem}.txt"), "text/plain; charset=utf-8"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_follow_tool() {
        assert_eq!(output_name(ToolKind::Merge, "a").0, "merged.pdf");
        assert_eq!(output_name(ToolKind::Split, "a").0, "a-split.zip");
        assert_eq!(output_name(ToolKind::Compress, "a").0, "a-compressed.pdf");
        assert_eq!(output_name(ToolKind::PdfToWord, "a").0, "a.docx");
        assert_eq!(output_name(ToolKind::WordToPdf, "memo").0, "memo.pdf");
        assert_eq!(output_name(ToolKind::PdfToJpg, "a").1, "application/zip");
    }

    #[tokio::test(start_paused = true)]
    async fn run_waits_for_delay_then_returns_placeholder() {
        let processor = SimulatedProcessor::default();
        let files = [UploadedFile::new("scan.pdf", 10)];
        let started = tokio::time::Instant::now();

        let artifact = processor.run(ToolKind::Compress, &files, Locale::En).await;

        assert!(started.elapsed() >= DEFAULT_DELAY);
        assert_eq!(artifact.file_name, "scan-compressed.pdf");
        assert_eq!(artifact.message, Messages::for_locale(Locale::En).success);
        assert!(!artifact.body.is_empty());
    }
}
