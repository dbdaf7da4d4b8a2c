//! `.todocheck.toml`, the per-repository configuration.
pub mod validation;

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::issuetracker::{Credentials, IssueTrackerKind};

pub const DEFAULT_CONFIG: &str = ".todocheck.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Derived from the `origin` git remote when absent.
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub issue_tracker: String,
    /// Globs relative to the base path.
    #[serde(default)]
    pub ignored: Vec<String>,
    #[serde(default)]
    pub custom_todos: Vec<String>,
    #[serde(default = "default_match_case_sensitive")]
    pub match_case_sensitive: bool,
    #[serde(default)]
    pub auth: Auth,
}

fn default_match_case_sensitive() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    #[default]
    None,
    ApiToken,
    Offline,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AuthType::None => "none",
            AuthType::ApiToken => "apitoken",
            AuthType::Offline => "offline",
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Auth {
    #[serde(rename = "type", default)]
    pub auth_type: AuthType,
    #[serde(default)]
    pub offline_url: Option<String>,
    #[serde(default = "default_tokens_cache")]
    pub tokens_cache: PathBuf,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Default for Auth {
    fn default() -> Self {
        Self {
            auth_type: AuthType::None,
            offline_url: None,
            tokens_cache: default_tokens_cache(),
            options: BTreeMap::new(),
        }
    }
}

/// `$HOME/.todocheck/authtokens.toml`, relative to the working directory when
/// there is no home.
pub fn default_tokens_cache() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".todocheck").join("authtokens.toml")
}

impl Auth {
    /// Tokens are cached per origin, or per offline URL for offline auth.
    pub fn token_key<'a>(&'a self, origin: &'a str) -> &'a str {
        match (self.auth_type, self.offline_url.as_deref()) {
            (AuthType::Offline, Some(url)) => url,
            _ => origin,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            origin: None,
            issue_tracker: String::new(),
            ignored: Vec::new(),
            custom_todos: Vec::new(),
            match_case_sensitive: default_match_case_sensitive(),
            auth: Auth::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::Config(format!(
                    "couldn't open local configuration {}: file not found",
                    path.display()
                )));
            }
            Err(source) => {
                return Err(Error::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, Error> {
        let mut config: Config = toml::from_str(content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.ignored = config
            .ignored
            .iter()
            .map(|p| normalize_ignored(p))
            .collect();
        Ok(config)
    }

    pub fn tracker(&self) -> Result<IssueTrackerKind, Error> {
        self.issue_tracker.parse()
    }

    pub fn credentials(&self, token: Option<String>) -> Credentials {
        Credentials {
            auth_type: self.auth.auth_type,
            token,
            username: self.auth.options.get("username").cloned(),
        }
    }
}

/// `./vendor/` and `vendor` name the same directory.
fn normalize_ignored(pattern: &str) -> String {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    pattern.trim_end_matches('/').to_owned()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
