//! HTTP request handlers.

pub(crate) mod config;
pub(crate) mod render;
pub(crate) mod share;
