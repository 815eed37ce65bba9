//! Closed language tag set and alias canonicalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language label attached to a piece of code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageTag {
    Text,
    Javascript,
    TypescriptJsx,
    Json,
    Python,
    Css,
    Html,
    Java,
    C,
    Cpp,
    Rust,
    Go,
    Yaml,
    Generic,
}

impl LanguageTag {
    /// Every tag, in declaration order.
    pub const ALL: [LanguageTag; 14] = [
        Self::Text,
        Self::Javascript,
        Self::TypescriptJsx,
        Self::Json,
        Self::Python,
        Self::Css,
        Self::Html,
        Self::Java,
        Self::C,
        Self::Cpp,
        Self::Rust,
        Self::Go,
        Self::Yaml,
        Self::Generic,
    ];

    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Javascript => "javascript",
            Self::TypescriptJsx => "typescript-jsx",
            Self::Json => "json",
            Self::Python => "python",
            Self::Css => "css",
            Self::Html => "html",
            Self::Java => "java",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Rust => "rust",
            Self::Go => "go",
            Self::Yaml => "yaml",
            Self::Generic => "generic",
        }
    }

    /// Friendly label for selectors and page titles.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Plain text",
            Self::Javascript => "JavaScript",
            Self::TypescriptJsx => "TypeScript/React",
            Self::Json => "JSON",
            Self::Python => "Python",
            Self::Css => "CSS",
            Self::Html => "HTML",
            Self::Java => "Java",
            Self::C => "C",
            Self::Cpp => "C++",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Yaml => "YAML",
            Self::Generic => "Code",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}'")]
pub struct UnknownLanguage(pub String);

impl FromStr for LanguageTag {
    type Err = UnknownLanguage;

    /// Parse canonical names and common aliases (`js`, `tsx`, `py`, `yml`, ...).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        let tag = match lowered.as_str() {
            "text" | "txt" | "plaintext" | "plain text" | "plain" => Self::Text,
            "javascript" | "js" | "mjs" | "cjs" => Self::Javascript,
            "typescript-jsx" | "tsx" | "jsx" | "react" => Self::TypescriptJsx,
            "json" | "jsonc" => Self::Json,
            "python" | "py" => Self::Python,
            "css" => Self::Css,
            "html" | "htm" => Self::Html,
            "java" => Self::Java,
            "c" | "h" => Self::C,
            "cpp" | "c++" | "cc" | "cxx" | "hpp" => Self::Cpp,
            "rust" | "rs" => Self::Rust,
            "go" | "golang" => Self::Go,
            "yaml" | "yml" => Self::Yaml,
            "generic" | "general" | "code" => Self::Generic,
            _ => return Err(UnknownLanguage(value.trim().to_string())),
        };
        Ok(tag)
    }
}
