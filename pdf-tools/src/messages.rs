//! Bilingual strings the backend hands to the front end.
//!
//! Only text that leaves the server lives here; layout copy (hero, footer,
//! donation banner) belongs to the UI shell.

use ai_gateway::Locale;
use serde::Serialize;

/// Static message table for one locale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Messages {
    pub brand: &'static str,
    pub success: &'static str,
    pub summary_ready: &'static str,
    pub processing: &'static str,
    pub start_processing: &'static str,
    pub ai_thinking: &'static str,
    pub chat_start: &'static str,
    pub upload_title: &'static str,
    pub upload_desc: &'static str,
    pub delete_notice: &'static str,
    /// Placeholder description sent with summarize requests.
    pub summarize_description: &'static str,
    /// Placeholder context sent with chat requests.
    pub chat_context: &'static str,
}

const AR: Messages = Messages {
    brand: "مدير ملفات PDF",
    success: "تمت معالجة الملف بنجاح! ملفك جاهز للتحميل.",
    summary_ready: "الملخص جاهز",
    processing: "جاري المعالجة...",
    start_processing: "ابدأ المعالجة",
    ai_thinking: "الذكاء الاصطناعي يفكر...",
    chat_start: "اطرح أي سؤال حول ملفك",
    upload_title: "اختر الملفات أو اسحبها هنا",
    upload_desc: "يدعم PDF و Word",
    delete_notice: "يتم حذف الملفات تلقائياً بعد ساعة",
    summarize_description: "ملف مستخدم تم رفعه للمعالجة.",
    chat_context: "سياق المستند الافتراضي...",
};

const EN: Messages = Messages {
    brand: "PDF Manager",
    success: "File processed successfully! Your file is ready to download.",
    summary_ready: "Summary ready",
    processing: "Processing...",
    start_processing: "Start processing",
    ai_thinking: "AI is thinking...",
    chat_start: "Ask anything about your file",
    upload_title: "Choose files or drop them here",
    upload_desc: "Supports PDF and Word",
    delete_notice: "Files are deleted automatically after one hour",
    summarize_description: "User uploaded file for processing.",
    chat_context: "Default document context...",
};

impl Messages {
    pub const fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::Ar => &AR,
            Locale::En => &EN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_match_locale() {
        assert_eq!(
            Messages::for_locale(Locale::En).chat_context,
            "Default document context..."
        );
        assert_eq!(
            Messages::for_locale(Locale::Ar).summarize_description,
            "ملف مستخدم تم رفعه للمعالجة."
        );
    }
}
