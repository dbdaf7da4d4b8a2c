//! Repository metadata: the issue tracker origin when the config omits it.
use std::path::Path;

use git2::Repository;

use crate::error::Error;

const ORIGIN_REMOTE: &str = "origin";

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let repo = Repository::discover(path)?;
        Ok(Self { repo })
    }

    /// URL of the `origin` remote as `host/owner/repo`.
    pub fn origin(&self) -> Result<String, Error> {
        let remote = self.repo.find_remote(ORIGIN_REMOTE)?;
        let url = remote.url().ok_or_else(|| {
            Error::Config(format!("remote {ORIGIN_REMOTE:?} has a non-UTF-8 url"))
        })?;
        Ok(normalize_remote_url(url))
    }
}

/// `git@github.com:owner/repo.git` and `https://user@github.com/owner/repo.git`
/// both become `github.com/owner/repo`.
pub fn normalize_remote_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_suffix(".git").unwrap_or(url);
    let url = url.trim_end_matches('/');

    if let Some((_, rest)) = url.split_once("://") {
        let rest = rest.split_once('@').map_or(rest, |(_, host)| host);
        return rest.to_owned();
    }

    // scp-like syntax: [user@]host:path
    let rest = url.split_once('@').map_or(url, |(_, host)| host);
    match rest.split_once(':') {
        Some((host, path)) => format!("{host}/{}", path.trim_start_matches('/')),
        None => rest.to_owned(),
    }
}

/// `Some(origin)` when `path` is inside a repository with an `origin` remote.
pub fn detect_origin(path: &Path) -> Option<String> {
    GitRepo::open(path).ok()?.origin().ok()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
