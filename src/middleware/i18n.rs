// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::{DEFAULT_LANGUAGE, SUPPORTED_LANGUAGES};

// Idioma das mensagens de erro, negociado pelo Accept-Language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANGUAGE.to_string())
    }
}

impl Locale {
    /// Primeiro idioma suportado na ordem de preferência do cabeçalho
    /// ("pt-BR;q=0.9, en;q=0.8" -> "pt").
    pub fn negotiate(header_value: &str) -> Self {
        accept_language::parse(header_value)
            .iter()
            .filter_map(|tag| tag.split('-').next())
            .map(|primary| primary.to_ascii_lowercase())
            .find(|primary| SUPPORTED_LANGUAGES.contains(&primary.as_str()))
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .map(Locale::negotiate)
            .unwrap_or_default();

        Ok(locale)
    }
}
