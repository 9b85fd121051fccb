use ai_gateway::Locale;
use serde::Deserialize;

use crate::error_handler::{AppError, AppResult};

/// `?lang=ar|en` query string shared by catalog and session routes.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

impl LangQuery {
    /// Parsed locale, or `None` when the parameter is absent or blank.
    pub fn locale(&self) -> AppResult<Option<Locale>> {
        parse_locale(self.lang.as_deref())
    }
}

pub fn parse_locale(raw: Option<&str>) -> AppResult<Option<Locale>> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e: ai_gateway::UnknownLocale| AppError::BadRequest(e.to_string())),
    }
}
