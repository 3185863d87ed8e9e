//! Configuration loading and validation errors.

/// A configuration source could not be read, or a field holds an unusable value.
///
/// Validation failures carry the offending field name so callers can point
/// at the setting instead of parsing the message.
///
/// # Examples
///
/// ```
/// use box51_error::ConfigError;
///
/// let err = ConfigError::invalid_field("key_length", "must be at least 1");
/// assert_eq!(err.field(), Some("key_length"));
/// assert!(err.to_string().contains("`key_length`"));
///
/// let err = ConfigError::new("box51.toml: unexpected end of input");
/// assert_eq!(err.field(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
pub struct ConfigError {
    /// Field that failed validation, if the error concerns one
    pub field: Option<&'static str>,
    /// What went wrong
    pub message: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// A read or parse failure not tied to a single field.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(None, message.into())
    }

    /// A field whose value is out of range or malformed.
    #[track_caller]
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        Self::at(Some(field), message.into())
    }

    /// Name of the offending field.
    pub fn field(&self) -> Option<&'static str> {
        self.field
    }

    #[track_caller]
    fn at(field: Option<&'static str>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            field,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.field {
            Some(field) => write!(f, "Configuration Error: `{}` {}", field, self.message)?,
            None => write!(f, "Configuration Error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
