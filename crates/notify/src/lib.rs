//! Owner notification rendering for governance actions.
//!
//! This crate provides:
//! - `NoticeKind` with the built-in subject/body templates (initial,
//!   reminder, disabled, extended)
//! - `NoticeContext` carrying the template variables with their defaults
//! - Minijinja template rendering with a `datetime` filter for epoch fields
//! - `Notice::build` producing the final `{to, subject, body}` triple
//!
//! Delivery transport is the caller's concern; nothing here talks to a
//! mail server.

pub mod render;
pub mod templates;

pub use render::{NoticeError, TemplateRenderer};
pub use templates::{Notice, NoticeContext, NoticeKind};
