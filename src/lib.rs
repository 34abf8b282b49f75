//! yamltree: a navigable outline of YAML mappings and sequences.
//!
//! The outline core ([`ast`], [`outline`], [`summary`], [`provider`], [`extension`]) talks to
//! the editor hosting it only through the [`host::Host`] trait. The terminal front end
//! ([`workbench`], [`app_state`], [`ui`]) is one such host.
pub mod app_state;
pub mod ast;
pub mod config;
pub mod document;
pub mod error;
pub mod extension;
pub mod formats;
pub mod host;
pub mod input;
pub mod outline;
pub mod provider;
pub mod summary;
pub mod ui;
pub mod workbench;
