//! Error types for the Voidwake content front end.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! The taxonomy follows the content-load failure classes: structural parse
//! failures abort one file, module-resolution failures feed back into import
//! search, script failures drop one module's contribution, and a dead script
//! runtime that cannot be restarted aborts the whole content-load phase.

use std::fmt;

use thiserror::Error;

/// Convenience result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for content-parsing operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a structural parse error inside a matched grammar rule.
    #[must_use]
    pub fn parse(rule: impl Into<String>, expected: impl Into<String>, line: u32, column: u32) -> Self {
        Self::new(ErrorKind::Parse {
            rule: rule.into(),
            expected: expected.into(),
            line,
            column,
        })
    }

    /// Creates a module-not-found error for the import hook.
    #[must_use]
    pub fn module_not_found(fullname: impl Into<String>) -> Self {
        Self::new(ErrorKind::ModuleNotFound(fullname.into()))
    }

    /// Creates a script compile/execution error for one module or file.
    #[must_use]
    pub fn script(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Script {
            file: file.into(),
            message: message.into(),
        })
    }

    /// Creates a runtime-corruption error (script runtime no longer usable).
    #[must_use]
    pub fn runtime_dead(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::RuntimeDead(detail.into()))
    }

    /// Creates an unknown-property configuration error.
    #[must_use]
    pub fn unknown_property(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownProperty(name.into()))
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        })
    }

    /// Creates a duplicate-content error.
    #[must_use]
    pub fn duplicate_content(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateContent(name.into()))
    }

    /// Returns true if this error ends the whole content-load phase.
    ///
    /// Only a script runtime that died and could not be restarted is fatal;
    /// every other failure class drops one file or one module.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::RuntimeDead(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err.to_string()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Malformed token sequence inside an otherwise-matched construct.
    #[error("parse error in {rule} at {line}:{column}: expected {expected}")]
    Parse {
        /// Name of the grammar rule (the complex-variable keyword, usually).
        rule: String,
        /// Description of the expected token.
        expected: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// Requested module path does not exist under the content directory.
    ///
    /// Distinct from [`ErrorKind::Script`]: callers treat this as a signal to
    /// continue normal import search, not as a broken module.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A script compiled or executed with an error.
    #[error("script error in {file}: {message}")]
    Script {
        /// The offending file.
        file: String,
        /// Original runtime error text.
        message: String,
    },

    /// The embedded script runtime reports as no-longer-running.
    #[error("script runtime dead: {0}")]
    RuntimeDead(String),

    /// A property name not present in any property-table group.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// Operand type not accepted where another type was expected.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type or enum kind.
        expected: String,
        /// The actual type or enum kind encountered.
        actual: String,
    },

    /// A content definition re-used an already-registered name.
    #[error("duplicate content name: {0}")]
    DuplicateContent(String),

    /// File could not be read.
    #[error("io error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub file: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "at {file}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}
