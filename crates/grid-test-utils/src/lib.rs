//! Shared test utilities for the gridsync workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`grid`]: [`TestGrid`](grid::TestGrid), a source folder plus a fake Steam install

pub mod grid;
