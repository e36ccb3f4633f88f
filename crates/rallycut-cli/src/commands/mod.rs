//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod inspect;
pub mod replay;
pub mod timeline;
