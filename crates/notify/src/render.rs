//! Minijinja rendering for governance notices.
//!
//! Templates are strings (the built-in notice kinds plus any operator
//! overrides), not pre-registered files, so a fresh
//! [`minijinja::Environment`] is created per render call.

use serde::Serialize;
use thiserror::Error;

/// Errors from notice rendering.
#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("Template rendering failed: {0}")]
    Template(String),
}

/// Renders notice templates using minijinja.
#[derive(Debug)]
pub struct TemplateRenderer {
    _private: (),
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Build a configured minijinja environment. String filters like
    /// `lower`/`upper` come from the "builtins" feature; only the
    /// governance-specific `datetime` filter is registered here.
    fn build_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        env.add_filter("datetime", datetime_filter);
        env
    }

    /// Render a template string with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeError::Template`] if the template is invalid or
    /// rendering fails.
    pub fn render<C: Serialize>(&self, template_str: &str, ctx: &C) -> Result<String, NoticeError> {
        let env = Self::build_env();
        env.render_str(template_str, ctx)
            .map_err(|e| NoticeError::Template(e.to_string()))
    }

    /// Validate that a template string parses. Syntax only; nothing is
    /// evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`NoticeError::Template`] if the template has syntax errors.
    pub fn validate(&self, template_str: &str) -> Result<(), NoticeError> {
        let env = Self::build_env();
        env.template_from_str(template_str)
            .map_err(|e| NoticeError::Template(e.to_string()))?;
        Ok(())
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Custom filter: format epoch seconds as a UTC timestamp. Zero and
/// negative values are the lookup convention for "unset" and render as
/// `n/a`. An optional argument overrides the strftime format.
fn datetime_filter(value: i64, format: Option<String>) -> String {
    if value <= 0 {
        return "n/a".to_string();
    }
    let fmt = format.unwrap_or_else(|| "%Y-%m-%d %H:%M UTC".to_string());
    match chrono::DateTime::from_timestamp(value, 0) {
        Some(dt) => dt.format(&fmt).to_string(),
        None => {
            tracing::warn!(epoch = value, "epoch out of range, rendering n/a");
            "n/a".to_string()
        }
    }
}
