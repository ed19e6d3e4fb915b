//! Data models for the intake service.
//!
//! Field names match the JSON submitted by the application form.

mod application;

pub use application::*;
