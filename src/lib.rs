//! citydash library
//!
//! This module exposes the aggregation core for use in integration tests.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod location;
pub mod theme;
