//! Errors for data loaded from outside the program (settings, level packs)

/// Failure to load settings or level data
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read
    Io(std::io::Error),
    /// JSON was malformed or did not match the expected shape
    Parse(serde_json::Error),
    /// Data parsed but breaks a level invariant
    Invalid(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::Parse(e) => write!(f, "Parse error: {}", e),
            LoadError::Invalid(msg) => write!(f, "Invalid level data: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Parse(e)
    }
}
