//! Rule predicates for the detection cascade.
//!
//! Patterns use the `regex` crate, which matches in linear time, so no input
//! can trigger catastrophic backtracking.

use super::{LanguageTag, Rule, Sample};
use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::de::IgnoredAny;

pub(super) static RULES: &[Rule] = &[
    Rule {
        name: "blank",
        tag: LanguageTag::Text,
        matches: is_blank,
    },
    Rule {
        name: "json",
        tag: LanguageTag::Json,
        matches: is_strict_json,
    },
    Rule {
        name: "html",
        tag: LanguageTag::Html,
        matches: looks_like_html,
    },
    Rule {
        name: "yaml",
        tag: LanguageTag::Yaml,
        matches: looks_like_yaml,
    },
    Rule {
        name: "java",
        tag: LanguageTag::Java,
        matches: looks_like_java,
    },
    Rule {
        name: "rust",
        tag: LanguageTag::Rust,
        matches: looks_like_rust,
    },
    Rule {
        name: "go",
        tag: LanguageTag::Go,
        matches: looks_like_go,
    },
    Rule {
        name: "cpp",
        tag: LanguageTag::Cpp,
        matches: looks_like_cpp,
    },
    Rule {
        name: "c",
        tag: LanguageTag::C,
        matches: looks_like_c_family,
    },
    Rule {
        name: "jsx",
        tag: LanguageTag::TypescriptJsx,
        matches: looks_like_jsx,
    },
    Rule {
        name: "css",
        tag: LanguageTag::Css,
        matches: looks_like_css,
    },
    Rule {
        name: "python",
        tag: LanguageTag::Python,
        matches: looks_like_python,
    },
    Rule {
        name: "javascript",
        tag: LanguageTag::Javascript,
        matches: looks_like_javascript,
    },
];

fn set(patterns: &[&str]) -> RegexSet {
    RegexSet::new(patterns).expect("detection patterns are valid")
}

fn is_blank(sample: &Sample<'_>) -> bool {
    sample.full.is_empty()
}

// Malformed JSON falls through: it is more often a JS object literal.
fn is_strict_json(sample: &Sample<'_>) -> bool {
    let text = sample.full;
    (text.starts_with('{') || text.starts_with('['))
        && serde_json::from_str::<IgnoredAny>(text).is_ok()
}

static HTML_DOCTYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<!doctype\s+html|<html[\s>]").expect("doctype pattern"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)<(?:head|body|div|span|script|style|p|a|ul|ol|li|table|form|section|header|footer|nav|main|article|h[1-6]|img|link|meta|title|button|input|label|template)[\s>/]",
    )
    .expect("html tag pattern")
});

// Tags embedded in code (JSX) do not count; markup has to lead the document.
fn looks_like_html(sample: &Sample<'_>) -> bool {
    if HTML_DOCTYPE.is_match(sample.head) {
        return true;
    }
    sample.head.starts_with('<') && HTML_TAG.is_match(sample.head)
}

static YAML_KEY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:[A-Za-z_][\w.-]*|"[^"]+"|'[^']+'):(?:[ \t]+(.*))?$"#)
        .expect("yaml key pattern")
});
static YAML_ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?:[A-Za-z_][\w.-]*:(?:\s|$)|- )").expect("yaml entry pattern")
});

fn looks_like_yaml(sample: &Sample<'_>) -> bool {
    let mut meaningful = sample.lines().map(str::trim_end).filter(|line| {
        let trimmed = line.trim_start();
        !trimmed.is_empty() && !trimmed.starts_with('#')
    });
    let Some(first) = meaningful.next() else {
        return false;
    };
    if first == "---" {
        return true;
    }
    // Top-level sequences of mappings (`- name: web`) open like a key line.
    let (first_mapping, list_item) = match first.strip_prefix("- ") {
        Some(rest) => (rest.trim_start(), true),
        None => (first, false),
    };
    let Some(captures) = YAML_KEY_LINE.captures(first_mapping) else {
        return false;
    };
    let first_value = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    if !is_plausible_yaml_value(first_value) {
        return false;
    }

    let mut entries = 1usize;
    for line in meaningful {
        if line.ends_with(';') || line.ends_with('{') {
            return false;
        }
        if YAML_ENTRY_LINE.is_match(line) {
            entries = entries.saturating_add(1);
        }
    }

    // A lone `key: value` line is only config when the value is short; a lone
    // list item never is.
    entries >= 2 || (!list_item && first_value.split_whitespace().count() <= 3)
}

fn is_plausible_yaml_value(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    if value.ends_with(';') || value.ends_with('{') {
        return false;
    }
    if value.starts_with('{') {
        return value.ends_with('}') && !value.contains(';');
    }
    !value.contains(char::is_control)
}

static JAVA_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"\bpublic\s+(?:(?:abstract|final|static)\s+)*(?:class|interface|enum|record)\s+\w",
        r"\bSystem\.(?:out|err)\.print",
        r"(?m)^\s*import\s+java\.",
        r"\bpublic\s+static\s+void\s+main\s*\(",
    ])
});

fn looks_like_java(sample: &Sample<'_>) -> bool {
    JAVA_SIGNALS.is_match(sample.head)
}

static RUST_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"\bfn\s+\w+\s*[<(]",
        r"\blet\s+mut\s+\w",
        r"\b(?:println|eprintln|format|vec)!\s*[(\[]",
        r"(?m)^\s*impl(?:\s*<[^>\n]*>)?\s+\w",
        r"(?m)^\s*use\s+(?:std|crate|super|self)::",
        r"#\[derive\(",
        r"\bpub\s+(?:fn|struct|enum|mod|trait)\s",
    ])
});

fn looks_like_rust(sample: &Sample<'_>) -> bool {
    RUST_SIGNALS.is_match(sample.head)
}

static GO_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"(?m)^\s*package\s+main\b",
        r"(?m)^\s*func\s+(?:\([^)\n]*\)\s*)?\w+\s*\(",
        r"\bfmt\.(?:Print|Sprint|Fprint|Errorf)",
    ])
});

fn looks_like_go(sample: &Sample<'_>) -> bool {
    GO_SIGNALS.is_match(sample.head)
}

static C_FAMILY_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r#"(?m)^\s*#\s*include\s*[<"]"#,
        r"\bprintf\s*\(",
        r"\bcout\b",
        r"\bcin\s*>>",
        r"\bstd::",
        r"\btemplate\s*<",
        r"\busing\s+namespace\s+std\b",
    ])
});
static CPP_MARKERS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"\bstd::",
        r"\bcout\b",
        r"\bcin\b",
        r"\btemplate\s*<",
        r"\busing\s+namespace\s+std\b",
    ])
});

fn looks_like_c_family(sample: &Sample<'_>) -> bool {
    C_FAMILY_SIGNALS.is_match(sample.head)
}

fn looks_like_cpp(sample: &Sample<'_>) -> bool {
    looks_like_c_family(sample) && CPP_MARKERS.is_match(sample.head)
}

static JSX_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        // UI framework imports
        r#"(?m)^\s*import\s[^\n]*\bfrom\s+["'](?:react|react-dom|preact|solid-js)(?:/[\w./-]*)?["']"#,
        r"(?m)^\s*import\s+React\b",
        r#"\brequire\(\s*["']react["']\s*\)"#,
        r"\breturn\s*\(",
        // prop-typed component signatures
        r"\bfunction\s*\w*\s*\(\s*\{[^}]*\}\s*:\s*\w",
        r"\(\s*\{[^}]*\}\s*:\s*\w[^)]*\)\s*=>",
        r":\s*(?:JSX\.Element|React\.FC|React\.ReactNode)\b",
        // closing or self-closing tags inside code
        r"</[A-Za-z][\w.]*\s*>",
        r"<[A-Za-z][\w.]*(?:\s[^<>]*)?/>",
    ])
});

fn looks_like_jsx(sample: &Sample<'_>) -> bool {
    JSX_SIGNALS.is_match(sample.head)
}

static CSS_BLOCK_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"@(?:media|keyframes|import|font-face|supports|charset)\b",
        r"(?m)^\s*[.#][A-Za-z_-][\w-]*[^{};()=\n]*\{",
        r"(?m)^\s*(?:html|body|div|span|a|p|h[1-6]|ul|ol|li|img|button|input|table|section|header|footer|nav|main|form|label|\*)(?:[\s,.:#>\[][^{};()=\n]*)?\{",
    ])
});
static CSS_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\{?\s*(-?[a-z]+(?:-[a-z]+)*)\s*:\s*([^{}]+?)\s*$")
        .expect("css declaration pattern")
});

/// Unhyphenated properties; hyphenated and vendor-prefixed names need no list.
const CSS_SINGLE_WORD_PROPERTIES: &[&str] = &[
    "animation", "background", "border", "bottom", "clear", "color", "columns", "content",
    "cursor", "direction", "display", "filter", "flex", "float", "font", "gap", "grid",
    "height", "inset", "left", "margin", "opacity", "order", "outline", "overflow", "padding",
    "position", "resize", "right", "top", "transform", "transition", "visibility", "width",
];

const TYPE_ANNOTATIONS: &[&str] = &[
    "any", "bigint", "boolean", "never", "null", "number", "object", "string", "symbol",
    "undefined", "unknown", "void",
];

// `name: string;` in a TS interface has the shape of a declaration.
fn looks_like_type_annotation(value: &str) -> bool {
    let first = value
        .split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .unwrap_or("");
    TYPE_ANNOTATIONS.contains(&first)
        || value.starts_with(|c: char| c.is_ascii_uppercase())
        || value.contains("=>")
        || value.contains('|')
        || value.contains('<')
}

fn is_css_declaration(segment: &str) -> bool {
    let Some(captures) = CSS_DECLARATION.captures(segment) else {
        return false;
    };
    let property = captures.get(1).map_or("", |m| m.as_str());
    let value = captures.get(2).map_or("", |m| m.as_str());
    // Hyphenated names cannot be bare identifiers in the curly-brace languages.
    if property.contains('-') {
        return true;
    }
    CSS_SINGLE_WORD_PROPERTIES.contains(&property) && !looks_like_type_annotation(value)
}

fn looks_like_css(sample: &Sample<'_>) -> bool {
    if CSS_BLOCK_SIGNALS.is_match(sample.head) {
        return true;
    }
    // Only `;`-terminated segments count as declarations.
    sample.lines().any(|line| {
        let mut segments: Vec<&str> = line.split(';').collect();
        segments.pop();
        segments.into_iter().any(is_css_declaration)
    })
}

static PYTHON_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"(?m)^\s*(?:async\s+)?def\s+\w+\s*\(",
        r"(?m)^\s*class\s+\w+\s*[(:]",
        r"(?m)^\s*import\s+[\w.]+(?:\s*,\s*[\w.]+)*(?:\s+as\s+\w+)?[ \t\r]*$",
        r"(?m)^\s*from\s+[\w.]+\s+import\s",
        // block openers: a line ending in `:`, optionally followed by a comment
        r"(?m):[ \t]*(?:#[^\n]*)?\r?$",
    ])
});

fn looks_like_python(sample: &Sample<'_>) -> bool {
    PYTHON_SIGNALS.is_match(sample.head)
}

static JAVASCRIPT_SIGNALS: Lazy<RegexSet> = Lazy::new(|| {
    set(&[
        r"\b(?:function|const|let|var|import|export)\b",
        r"=>",
        r"(?m)(?:^|\s)//",
        r"/\*",
        r"\bconsole\.\w+\s*\(",
    ])
});

fn looks_like_javascript(sample: &Sample<'_>) -> bool {
    JAVASCRIPT_SIGNALS.is_match(sample.head)
}
