//! Core CSS parser: tokens to grammar events.

pub mod event;
#[expect(clippy::module_inception, reason = "parser::parser mirrors the crate layout")]
pub mod parser;

pub use event::Event;
pub use parser::{Mode, Parser};
