use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::Error;
use crate::language;
use crate::logging::Logger;

/// Compiled `ignored` patterns, matched against paths relative to the root.
#[derive(Debug, Clone)]
pub struct IgnoredPaths {
    root: PathBuf,
    globs: GlobSet,
}

impl IgnoredPaths {
    pub fn new(root: &Path, patterns: &[String]) -> Result<Self, Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            root: root.to_path_buf(),
            globs: builder.build()?,
        })
    }

    pub fn is_ignored(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        !rel.as_os_str().is_empty() && self.globs.is_match(rel)
    }
}

/// Every readable source file under `root`, sorted by name. Hidden
/// directories and ignored paths are pruned; files whose extension has no
/// registered language are left out.
pub fn source_files(
    root: &Path,
    ignored: &IgnoredPaths,
    logger: &dyn Logger,
) -> Result<Vec<PathBuf>, Error> {
    let pruned = Arc::new(Mutex::new(Vec::new()));
    let walker = {
        let ignored = ignored.clone();
        let pruned = Arc::clone(&pruned);
        WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                let hidden = is_dir && entry.file_name().to_string_lossy().starts_with('.');
                if hidden || ignored.is_ignored(entry.path()) {
                    if let Ok(mut pruned) = pruned.lock() {
                        pruned.push(entry.path().to_path_buf());
                    }
                    return false;
                }
                true
            })
            .build()
    };

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| Error::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        if language::detect(entry.path()).is_some() {
            files.push(entry.into_path());
        }
    }

    if let Ok(pruned) = pruned.lock() {
        for path in pruned.iter() {
            logger.debug(format_args!("skipping {}", path.display()));
        }
    }
    Ok(files)
}

/// Check whether a reader points to a binary file by looking for null bytes
/// in the first 512 bytes. Resets the reader position to the start afterward.
pub fn is_binary_reader<R: Read + Seek>(reader: &mut R) -> io::Result<bool> {
    let mut header = [0u8; 512];
    let n = reader.read(&mut header)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(header[..n].contains(&0))
}

/// File contents, or `None` for binary files. Invalid UTF-8 is replaced.
pub fn read_source(path: &Path) -> Result<Option<String>, Error> {
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(read_err)?;
    if is_binary_reader(&mut file).map_err(read_err)? {
        return Ok(None);
    }
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;
    Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Lines with their endings and 1-based numbers. The last line gains a `\n`
/// when the file doesn't end with one.
pub fn numbered_lines(content: &str) -> impl Iterator<Item = (usize, Cow<'_, str>)> {
    content.split_inclusive('\n').enumerate().map(|(i, line)| {
        let line = if line.ends_with('\n') {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(format!("{line}\n"))
        };
        (i + 1, line)
    })
}

#[cfg(test)]
#[path = "walk_test.rs"]
mod tests;
