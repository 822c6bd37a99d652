//! Marquee - trending-movie catalog with a public review board
//!
//! This library crate exposes the core functionality for integration testing.

pub mod catalog;
pub mod config;
pub mod reviews;
pub mod server;
