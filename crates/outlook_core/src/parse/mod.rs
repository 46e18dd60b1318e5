//! Identifier grammar parsing for outlook source files.

pub mod identifier;
