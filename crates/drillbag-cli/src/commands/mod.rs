//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod pools;
pub mod practice;
