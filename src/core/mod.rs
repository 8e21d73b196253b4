//! Core types and functionality for armsynth
//!
//! This module holds the pieces every other module leans on:
//!
//! ## `error` - Error Handling
//! - [`SynthError`] - Enumerated error types for the synthesis core
//! - [`ErrorContext`] - User-facing error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to that format
//!
//! ## `resource` - Resource Type System
//! - [`ResourceType`] - Path helpers over type identifiers
//! - [`DependencyTarget`] - Capability trait for anything that can be depended on

pub mod error;
pub mod resource;

pub use error::{ErrorContext, SynthError, user_friendly_error};
pub use resource::{DependencyTarget, ResourceType, name_segments, parent_name};
