use std::path::PathBuf;

/// Degradations hit while reading a names file. These are recorded and
/// logged, never returned to the caller of `NameList::load`.
#[derive(Debug, thiserror::Error)]
pub enum NameSourceError {
    #[error("Names file '{}' could not be read: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line} is not valid UTF-8 and was skipped: {source}")]
    DecodeSkipped {
        line: usize,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
