//! Core library for A-SDLC projects: scaffolding, story plans and the
//! conformance validator that scores a project against the framework layout.

pub mod config;
pub mod conformance;
pub mod error;
pub mod io;
pub mod paths;
pub mod plan;
pub mod scaffold;
pub mod sections;
pub mod story;
pub mod tree;
pub mod types;

pub use error::{AsdlcError, Result};
