//! Main module for paxter library functionality

pub mod ast;
pub mod error;
pub mod formats;
pub mod interp;
pub mod lexing;
pub mod parsing;
pub mod presets;
pub mod testing;
