//! Token acquisition: tokens cache, then environment, then a prompt whose
//! answer is written back to the cache.
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{Auth, AuthType};
use crate::error::Error;
use crate::logging::Logger;

pub const TOKEN_ENV: &str = "TODOCHECK_AUTH_TOKEN";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TokenStore {
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

impl TokenStore {
    /// Reads the cache, creating an empty one (and its directory) if missing.
    pub fn load_or_create(path: &Path) -> Result<Self, Error> {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let store = Self::default();
                store.save(path)?;
                Ok(store)
            }
            Err(source) => Err(Error::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let write_err = |source| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        let content = toml::to_string(self).map_err(|e| Error::Serialize(e.to_string()))?;
        fs::write(path, content).map_err(write_err)?;
        restrict_permissions(path).map_err(write_err)
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.tokens
            .get(key)
            .map(String::as_str)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_: &Path) -> io::Result<()> {
    Ok(())
}

/// How the prompted answer is read.
pub enum TokenInput<'a> {
    /// Read from the controlling terminal with echo turned off.
    Hidden,
    /// One line from a pipe or redirected stdin.
    Piped(&'a mut dyn BufRead),
}

impl TokenInput<'_> {
    fn read_token(self) -> io::Result<String> {
        match self {
            TokenInput::Hidden => rpassword::read_password(),
            TokenInput::Piped(input) => {
                let mut line = String::new();
                input.read_line(&mut line)?;
                Ok(line)
            }
        }
    }
}

/// Where a token comes from when the cache has none.
pub struct TokenPrompt<'a> {
    pub env_token: Option<String>,
    pub input: TokenInput<'a>,
    pub output: &'a mut dyn Write,
}

/// Returns `None` for `auth.type = none`. `key` is the origin, or the
/// offline URL for offline auth.
pub fn acquire_token(
    auth: &Auth,
    key: &str,
    instructions: &str,
    prompt: TokenPrompt<'_>,
    logger: &dyn Logger,
) -> Result<Option<String>, Error> {
    if auth.auth_type == AuthType::None {
        return Ok(None);
    }

    let mut store = TokenStore::load_or_create(&auth.tokens_cache)?;
    if let Some(token) = store.get(key) {
        logger.debug(format_args!("using cached token for {key}"));
        return Ok(Some(token.to_owned()));
    }
    if let Some(token) = prompt.env_token.filter(|t| !t.is_empty()) {
        logger.debug(format_args!("using token from {TOKEN_ENV}"));
        return Ok(Some(token));
    }

    let io_err = |e: io::Error| Error::Auth(e.to_string());
    write!(prompt.output, "{instructions}\nToken: ").map_err(io_err)?;
    prompt.output.flush().map_err(io_err)?;
    let token = prompt.input.read_token().map_err(io_err)?.trim().to_owned();
    if token.is_empty() {
        return Err(Error::Auth("no token entered".into()));
    }

    store.tokens.insert(key.to_owned(), token.clone());
    store.save(&auth.tokens_cache)?;
    logger.info(format_args!(
        "token for {key} saved to {}",
        auth.tokens_cache.display()
    ));
    Ok(Some(token))
}

/// `acquire_token` against the real environment, prompting on stderr.
/// Typed tokens are not echoed when stdin is a terminal.
pub fn acquire_token_interactive(
    auth: &Auth,
    key: &str,
    instructions: &str,
    logger: &dyn Logger,
) -> Result<Option<String>, Error> {
    let stdin = io::stdin();
    let terminal = stdin.is_terminal();
    let mut lines = stdin.lock();
    let mut output = io::stderr();
    let prompt = TokenPrompt {
        env_token: std::env::var(TOKEN_ENV).ok(),
        input: if terminal {
            TokenInput::Hidden
        } else {
            TokenInput::Piped(&mut lines)
        },
        output: &mut output,
    };
    acquire_token(auth, key, instructions, prompt, logger)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
