//! Error handling for armsynth
//!
//! The synthesis core has very few fatal conditions. A dependency cycle aborts
//! a synthesis run; everything else the structural checks find is reported as
//! data through [`crate::validation::ValidationIssue`] rather than raised.
//!
//! # Architecture
//!
//! - [`SynthError`] - Enumerated error types for the failure cases of the core
//! - [`ErrorContext`] - Wrapper that adds user-facing details and suggestions
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] coming out of the
//! pipeline into an [`ErrorContext`] with a suggestion attached.
//!
//! # Examples
//!
//! ```rust,no_run
//! use armsynth::core::{ErrorContext, SynthError, user_friendly_error};
//!
//! let error = SynthError::CircularDependency {
//!     chain: "A → B → A".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for synthesis operations.
///
/// # Error Categories
///
/// ## Graph
/// - [`SynthError::CircularDependency`] - dependency cycle between records (fatal)
///
/// ## Construct layer
/// - [`SynthError::InvalidShape`] - a nested property block has the wrong shape
/// - [`SynthError::InvalidConstructReference`] - a construct id not owned by the tree
///
/// ## Configuration
/// - [`SynthError::ConfigError`], [`SynthError::ConfigParseError`], [`SynthError::TomlError`]
///
/// File read failures are not a variant; the config loader reports them as
/// `anyhow` context naming the path.
#[derive(Error, Debug)]
pub enum SynthError {
    /// Circular dependency detected between records.
    ///
    /// `chain` lists node keys from the first repeated node back to itself,
    /// in traversal order, joined with ` → `.
    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// String representation of the circular dependency chain
        chain: String,
    },

    /// A nested property block failed its shape check.
    #[error("Invalid {shape}: {reason}")]
    InvalidShape {
        /// Name of the expected shape (e.g. "subnet delegation")
        shape: String,
        /// What is wrong and how to fix it
        reason: String,
    },

    /// A construct id that does not belong to the tree it was used with.
    #[error("Construct reference #{id} does not belong to this construct tree")]
    InvalidConstructReference {
        /// The raw construct index
        id: usize,
    },

    /// Configuration content is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Configuration file could not be parsed.
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path of the file that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Anything else
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for SynthError {
    fn clone(&self) -> Self {
        match self {
            Self::CircularDependency {
                chain,
            } => Self::CircularDependency {
                chain: chain.clone(),
            },
            Self::InvalidShape {
                shape,
                reason,
            } => Self::InvalidShape {
                shape: shape.clone(),
                reason: reason.clone(),
            },
            Self::InvalidConstructReference {
                id,
            } => Self::InvalidConstructReference {
                id: *id,
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            // The parser error is not Clone; keep its rendered message
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error wrapper carrying user-facing details and a suggestion.
///
/// ```rust,no_run
/// use armsynth::core::{ErrorContext, SynthError};
///
/// let context = ErrorContext::new(SynthError::ConfigError {
///     message: "unknown detection mode".to_string(),
/// })
/// .with_suggestion("Use 'heuristic' or 'explicit-only'")
/// .with_details("The detection mode controls which dependency sources are used");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SynthError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: SynthError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert an [`anyhow::Error`] into an [`ErrorContext`] with a suggestion.
///
/// Errors that are already an [`ErrorContext`] are returned unchanged (their
/// suggestion is kept). Known [`SynthError`] variants get a tailored
/// suggestion; anything else is wrapped as [`SynthError::Other`] with the full
/// `anyhow` chain as its message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<ErrorContext>() {
        Ok(ctx) => return ctx,
        Err(error) => error,
    };

    match error.downcast_ref::<SynthError>() {
        Some(synth_error) => create_error_context(synth_error.clone()),
        None => ErrorContext::new(SynthError::Other {
            message: format!("{error:#}"),
        }),
    }
}

fn create_error_context(error: SynthError) -> ErrorContext {
    match &error {
        SynthError::CircularDependency {
            ..
        } => ErrorContext::new(error)
            .with_suggestion(
                "Break the cycle by removing one explicit dependency or one cross-resource reference",
            )
            .with_details(
                "Resources cannot be ordered for deployment while they depend on each other. \
                 References are detected when one resource's properties mention another resource's name.",
            ),
        SynthError::InvalidShape {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Wrap the nested block's settings in a 'properties' object"),
        SynthError::InvalidConstructReference {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Only link constructs that were added to the same ConstructTree",
        ),
        SynthError::ConfigParseError {
            reason,
            ..
        } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check the TOML syntax of the synthesis configuration")
                .with_details(details)
        }
        _ => ErrorContext::new(error),
    }
}
