//! The fixed set of tools offered on the home grid.

use std::{fmt, str::FromStr};

use ai_gateway::Locale;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// File extensions the upload picker accepts for every tool.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

/// Tool identifier, kebab-case on the wire (`pdf-to-word`, `ai-chat`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Merge,
    Split,
    Compress,
    PdfToWord,
    WordToPdf,
    PdfToJpg,
    AiSummarize,
    AiChat,
}

impl ToolKind {
    /// All tools in grid order.
    pub const ALL: [Self; 8] = [
        Self::Merge,
        Self::Split,
        Self::Compress,
        Self::PdfToWord,
        Self::WordToPdf,
        Self::PdfToJpg,
        Self::AiSummarize,
        Self::AiChat,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Compress => "compress",
            Self::PdfToWord => "pdf-to-word",
            Self::WordToPdf => "word-to-pdf",
            Self::PdfToJpg => "pdf-to-jpg",
            Self::AiSummarize => "ai-summarize",
            Self::AiChat => "ai-chat",
        }
    }

    /// Only merging takes more than one input file.
    pub const fn accepts_multiple(self) -> bool {
        matches!(self, Self::Merge)
    }

    /// Tools backed by the completion service rather than the simulator.
    pub const fn is_ai(self) -> bool {
        matches!(self, Self::AiSummarize | Self::AiChat)
    }

    /// Card accent color (Tailwind class used by the UI).
    pub const fn color(self) -> &'static str {
        match self {
            Self::Merge => "bg-red-500",
            Self::Split => "bg-orange-500",
            Self::Compress => "bg-blue-500",
            Self::PdfToWord => "bg-sky-500",
            Self::WordToPdf => "bg-indigo-500",
            Self::PdfToJpg => "bg-emerald-500",
            Self::AiSummarize => "bg-purple-600",
            Self::AiChat => "bg-rose-600",
        }
    }

    pub const fn title(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Merge, Locale::Ar) => "دمج PDF",
            (Self::Merge, Locale::En) => "Merge PDF",
            (Self::Split, Locale::Ar) => "تقسيم PDF",
            (Self::Split, Locale::En) => "Split PDF",
            (Self::Compress, Locale::Ar) => "ضغط PDF",
            (Self::Compress, Locale::En) => "Compress PDF",
            (Self::PdfToWord, Locale::Ar) => "PDF إلى Word",
            (Self::PdfToWord, Locale::En) => "PDF to Word",
            (Self::WordToPdf, Locale::Ar) => "Word إلى PDF",
            (Self::WordToPdf, Locale::En) => "Word to PDF",
            (Self::PdfToJpg, Locale::Ar) => "PDF إلى JPG",
            (Self::PdfToJpg, Locale::En) => "PDF to JPG",
            (Self::AiSummarize, Locale::Ar) => "تلخيص بالذكاء الاصطناعي",
            (Self::AiSummarize, Locale::En) => "AI Summarize",
            (Self::AiChat, Locale::Ar) => "دردشة مع PDF",
            (Self::AiChat, Locale::En) => "Chat with PDF",
        }
    }

    pub const fn description(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Merge, Locale::Ar) => "اجمع عدة ملفات PDF في ملف واحد بالترتيب الذي تريده.",
            (Self::Merge, Locale::En) => "Combine multiple PDFs into one file in the order you want.",
            (Self::Split, Locale::Ar) => "افصل صفحات ملف PDF إلى ملفات مستقلة.",
            (Self::Split, Locale::En) => "Separate PDF pages into independent files.",
            (Self::Compress, Locale::Ar) => "قلل حجم ملف PDF مع الحفاظ على الجودة.",
            (Self::Compress, Locale::En) => "Reduce PDF size while keeping the quality.",
            (Self::PdfToWord, Locale::Ar) => "حوّل ملفات PDF إلى مستندات Word قابلة للتعديل.",
            (Self::PdfToWord, Locale::En) => "Turn PDFs into editable Word documents.",
            (Self::WordToPdf, Locale::Ar) => "حوّل مستندات Word إلى ملفات PDF.",
            (Self::WordToPdf, Locale::En) => "Turn Word documents into PDF files.",
            (Self::PdfToJpg, Locale::Ar) => "استخرج صفحات PDF كصور JPG.",
            (Self::PdfToJpg, Locale::En) => "Extract PDF pages as JPG images.",
            (Self::AiSummarize, Locale::Ar) => "احصل على ملخص ذكي لأهم نقاط مستندك.",
            (Self::AiSummarize, Locale::En) => "Get a smart summary of your document's key points.",
            (Self::AiChat, Locale::Ar) => "اسأل مستندك واحصل على إجابات فورية.",
            (Self::AiChat, Locale::En) => "Ask your document and get instant answers.",
        }
    }

    pub fn descriptor(self, locale: Locale) -> ToolDescriptor {
        ToolDescriptor {
            id: self,
            title: self.title(locale),
            description: self.description(locale),
            color: self.color(),
            accepts_multiple: self.accepts_multiple(),
            is_ai: self.is_ai(),
            accepted_extensions: &ACCEPTED_EXTENSIONS,
        }
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.id() == s.trim())
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Card shown on the home grid.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub id: ToolKind,
    pub title: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    pub accepts_multiple: bool,
    /// Rendered with the AI badge; runs through the document assistant.
    pub is_ai: bool,
    pub accepted_extensions: &'static [&'static str],
}

/// Localized tool grid in display order.
pub fn tool_catalog(locale: Locale) -> Vec<ToolDescriptor> {
    ToolKind::ALL
        .into_iter()
        .map(|t| t.descriptor(locale))
        .collect()
}
