use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while resolving an issue's status through the tracker API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("couldn't execute GET request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bad status code upon fetching task: {status} - {body}")]
    BadStatus { status: u16, body: String },

    #[error("couldn't unmarshal response task JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("couldn't find issue status in response: {0}")]
    MissingStatus(String),
}

/// Crate-level error. TODO findings are not errors; see `checker::TodoError`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("couldn't read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't traverse {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to parse configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("{0}")]
    Config(String),

    #[error("couldn't fetch task status: {0}")]
    Fetch(#[from] FetchError),

    #[error("couldn't acquire token: {0}")]
    Auth(String),

    #[error("invalid ignored pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("invalid todo pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("git: {0}")]
    Git(#[from] git2::Error),

    #[error("couldn't serialize: {0}")]
    Serialize(String),

    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("invalid todo, no issue reference in {0:?}")]
    InvalidTodo(String),
}

impl Error {
    /// Defects in the matcher tables rather than problems with the input or
    /// the environment.
    pub fn is_defect(&self) -> bool {
        matches!(self, Error::Invariant(_) | Error::InvalidTodo(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defects_are_distinguished() {
        assert!(Error::Invariant("x".into()).is_defect());
        assert!(Error::InvalidTodo("// TODO: x".into()).is_defect());
        assert!(!Error::Config("bad".into()).is_defect());
        assert!(
            !Error::Fetch(FetchError::BadStatus {
                status: 500,
                body: String::new()
            })
            .is_defect()
        );
    }

    #[test]
    fn bad_status_message() {
        let err = FetchError::BadStatus {
            status: 401,
            body: "unauthorized".into(),
        };
        assert_eq!(
            err.to_string(),
            "bad status code upon fetching task: 401 - unauthorized"
        );
    }
}
