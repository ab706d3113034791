//! CodeK7 TUI - a terminal client for uploading videos and following their
//! processing in real time.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod catalog;
pub mod error;
pub mod models;
pub mod notifications;
pub mod startup;
pub mod state;
pub mod traits;
pub mod ui;
pub mod upload;
