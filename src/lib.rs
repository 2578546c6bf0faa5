//! Tag-style autocomplete selector.
//!
//! A [`selector::Selector`] filters a pool of [`record::Record`]s against the
//! typed text, ranks prefix matches ahead of substring matches, and keeps the
//! committed picks as chips whose saved-key values serialize to `"a;b;"`.
//! The [`app`] and [`ui`] modules host it in a terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod record;
pub mod selector;
pub mod template;
pub mod ui;
