//! Line input handling
//!
//! Each line typed at the prompt is parsed into a [`Command`].

pub mod commands;

pub use commands::{Command, help_text, parse};
