//! Domain modules.

pub mod tools;
