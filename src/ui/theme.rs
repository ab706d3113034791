//! Color theme constants
//!
//! Minimal dark palette used throughout the UI.

use ratatui::style::Color;

/// Border color for panels
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights and selected rows
pub const COLOR_ACCENT: Color = Color::White;

/// Titles and table headers
pub const COLOR_HEADER: Color = Color::Yellow;

/// Connected / success states
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Disconnected / failure states
pub const COLOR_ERROR: Color = Color::Red;

/// Less important text
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for the message overlay
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

/// Marker for data served from the local cache
pub const COLOR_STALE: Color = Color::Rgb(230, 160, 40);
