//! Miscellaneous utilities for parsing unit expressions.

pub mod source;
pub mod tokenizer;
