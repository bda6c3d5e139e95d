//! UI rendering module for citydash
//!
//! This module contains the rendering logic for the terminal dashboard,
//! using the ratatui library for TUI components. Rendering only reads the
//! aggregated state; it never mutates it.

pub mod dashboard;

pub use dashboard::render_dashboard;
