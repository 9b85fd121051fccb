//! Prompt templates, system instructions and fallback messages.
//!
//! Every user-supplied value is embedded verbatim; nothing is trimmed,
//! escaped or truncated on the way into the prompt.

use crate::locale::Locale;

/// Which assistant operation a text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Summarize,
    Chat,
}

/// Builds the summarize prompt for `document_name`.
pub fn summarize_prompt(locale: Locale, document_name: &str, description: &str) -> String {
    match locale {
        Locale::Ar => format!(
            "قم بتلخيص هذا الملف المسمى \"{document_name}\". وصف الملف هو: {description}. \
             قدم التلخيص باللغة العربية بشكل نقاط احترافية ومنظمة جداً، مع التركيز على النقاط الجوهرية."
        ),
        Locale::En => format!(
            "Summarize the file named \"{document_name}\". File description: {description}. \
             Present the summary in English as well-organized, professional bullet points, \
             focusing on the essential points."
        ),
    }
}

/// Builds the question-answering prompt for `document_name`.
pub fn chat_prompt(locale: Locale, query: &str, document_name: &str, context: &str) -> String {
    match locale {
        Locale::Ar => format!(
            "بناءً على المستند \"{document_name}\" والمحتوى التالي: \"{context}\"، أجب على السؤال التالي بدقة: {query}"
        ),
        Locale::En => format!(
            "Based on the document \"{document_name}\" and the following content: \"{context}\", \
             answer the following question precisely: {query}"
        ),
    }
}

/// Fixed system instruction sent with every request of `task`.
pub const fn system_instruction(task: Task, locale: Locale) -> &'static str {
    match (task, locale) {
        (Task::Summarize, Locale::Ar) => {
            "أنت خبير في تحليل المستندات والذكاء الاصطناعي. مهمتك هي استخراج أدق التفاصيل وتقديم ملخصات تنفيذية عالية الجودة باللغة العربية."
        }
        (Task::Summarize, Locale::En) => {
            "You are an expert in document analysis and AI. Your job is to extract the finest details and deliver high-quality executive summaries in English."
        }
        (Task::Chat, Locale::Ar) => {
            "أنت مساعد ذكي متخصص في فهم وتحليل ملفات PDF. أجب على أسئلة المستخدم بناءً على السياق المقدم فقط، وكن دقيقاً ومختصراً وباللغة العربية."
        }
        (Task::Chat, Locale::En) => {
            "You are a smart assistant specialized in understanding and analyzing PDF files. Answer the user's questions based only on the provided context, and be precise, concise and in English."
        }
    }
}

/// Message returned instead of an error when the service call fails.
pub const fn failure_message(task: Task, locale: Locale) -> &'static str {
    match (task, locale) {
        (Task::Summarize, Locale::Ar) => {
            "عذراً، حدث خطأ أثناء محاولة تلخيص الملف. يرجى التأكد من إعداد مفتاح API بشكل صحيح."
        }
        (Task::Summarize, Locale::En) => {
            "Sorry, something went wrong while summarizing the file. Please make sure the API key is configured correctly."
        }
        (Task::Chat, Locale::Ar) => {
            "حدث خطأ أثناء التواصل مع الذكاء الاصطناعي. يرجى التأكد من صلاحية المفتاح والاتصال."
        }
        (Task::Chat, Locale::En) => {
            "An error occurred while contacting the AI. Please check the API key and your connection."
        }
    }
}

/// Message returned when the service answered but produced no text.
pub const fn empty_message(task: Task, locale: Locale) -> &'static str {
    match (task, locale) {
        (Task::Summarize, Locale::Ar) => "فشل في إنشاء ملخص.",
        (Task::Summarize, Locale::En) => "Failed to generate summary.",
        (Task::Chat, Locale::Ar) => "لا يمكنني الإجابة حالياً.",
        (Task::Chat, Locale::En) => "I cannot answer right now.",
    }
}
