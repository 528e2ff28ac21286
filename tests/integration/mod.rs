//! Integration tests for console-guard
//!
//! These tests exercise real storage and the full HTTP stack without mocks.

pub mod app_tests;
pub mod database_tests;
pub mod error_handling_tests;
