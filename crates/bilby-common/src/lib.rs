//! Shared infrastructure for the Bilby CSS engine.
//!
//! This crate provides the pieces every other Bilby crate builds on:
//! - **Error taxonomy** - the [`Error`] enum returned throughout the engine
//! - **Fixed-point numerics** - the 24.8 [`Fixed`] type used for all CSS
//!   lengths, angles, frequencies, and percentages
//! - **String interner** - reference-counted unique string storage with
//!   pointer-equality [`Atom`]s
//! - **Warning system** - deduplicated terminal output for discarded input

pub mod error;
pub mod fixed;
pub mod interner;
pub mod warning;

pub use error::{Error, Result};
pub use fixed::Fixed;
pub use interner::{Atom, Interner};
