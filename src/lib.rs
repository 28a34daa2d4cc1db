//! Pagesmith Library
//!
//! This library provides the core of a grid-based page builder: the component
//! model, the editor state with its grid and font rules, page serialization,
//! record storage, and the persistence API served over HTTP.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod editor;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
