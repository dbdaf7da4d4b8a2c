/// Extension registry: which comment dialect a file is read with.
use std::path::Path;

/// Comment grammar family. Selects both the comment state machine and the
/// flavour of TODO patterns applied to its comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// `//`, `/* */`. Nested block comments for Rust, Swift, Kotlin, Scala.
    Standard { nested: bool },
    Python,
    Groovy,
    Nim,
    /// Shell-like: `#` line comments only.
    Scripts,
    Php,
    Vue,
    Twig,
}

impl Dialect {
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Standard { nested: false } => "standard",
            Dialect::Standard { nested: true } => "standard (nested)",
            Dialect::Python => "python",
            Dialect::Groovy => "groovy",
            Dialect::Nim => "nim",
            Dialect::Scripts => "scripts",
            Dialect::Php => "php",
            Dialect::Vue => "vue",
            Dialect::Twig => "twig",
        }
    }
}

#[derive(Debug)]
pub struct LanguageSpec {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
    pub dialect: Dialect,
}

macro_rules! lang {
    ($name:expr, ext: [$($ext:expr),+], nested) => {
        LanguageSpec {
            name: $name,
            extensions: &[$($ext),+],
            dialect: Dialect::Standard { nested: true },
        }
    };
    ($name:expr, ext: [$($ext:expr),+]) => {
        LanguageSpec {
            name: $name,
            extensions: &[$($ext),+],
            dialect: Dialect::Standard { nested: false },
        }
    };
    ($name:expr, ext: [$($ext:expr),+], $dialect:ident) => {
        LanguageSpec {
            name: $name,
            extensions: &[$($ext),+],
            dialect: Dialect::$dialect,
        }
    };
}

pub fn languages() -> &'static [LanguageSpec] {
    static LANGUAGES: &[LanguageSpec] = &[
        lang!("C", ext: ["c", "h"]),
        lang!("C++", ext: ["cpp", "cc", "cxx", "hpp"]),
        lang!("C#", ext: ["cs"]),
        lang!("Dart", ext: ["dart"]),
        lang!("Go", ext: ["go"]),
        lang!("Java", ext: ["java"]),
        lang!("JavaScript", ext: ["js", "jsx", "mjs"]),
        lang!("TypeScript", ext: ["ts", "tsx"]),
        lang!("SCSS", ext: ["scss"]),
        lang!("Less", ext: ["less"]),
        lang!("Rust", ext: ["rs"], nested),
        lang!("Swift", ext: ["swift"], nested),
        lang!("Kotlin", ext: ["kt", "kts"], nested),
        lang!("Scala", ext: ["scala", "sc"], nested),
        lang!("Python", ext: ["py"], Python),
        lang!("Groovy", ext: ["groovy", "gradle", "gvy", "gy", "gsh"], Groovy),
        lang!("Nim", ext: ["nim"], Nim),
        lang!("Shell", ext: ["sh", "bash", "zsh"], Scripts),
        lang!("R", ext: ["R", "r"], Scripts),
        lang!("YAML", ext: ["yaml", "yml"], Scripts),
        lang!("PHP", ext: ["php"], Php),
        lang!("Vue", ext: ["vue"], Vue),
        lang!("Twig", ext: ["twig"], Twig),
    ];
    LANGUAGES
}

pub fn detect(path: &Path) -> Option<&'static LanguageSpec> {
    let ext = path.extension()?.to_str()?;
    languages().iter().find(|spec| spec.extensions.contains(&ext))
}

pub fn supported_extensions() -> impl Iterator<Item = &'static str> {
    languages().iter().flat_map(|spec| spec.extensions.iter().copied())
}

#[cfg(test)]
#[path = "language_test.rs"]
mod tests;
