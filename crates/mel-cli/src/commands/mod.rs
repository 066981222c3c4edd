//! CLI commands.

pub mod compare;
pub mod convert;
pub mod echo;
pub mod info;
