//! HTTP request handlers.

/// Language detection endpoint for the editor.
pub mod detect;
pub(crate) mod request;
/// Share, load, and raw-view endpoints.
pub mod store;
