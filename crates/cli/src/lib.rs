//! Common utilities for the command line interface.
use regex::Regex;
use std::path::Path;

pub mod args;
pub mod config;
pub mod output;
pub mod rules;
pub mod scan;
pub mod ui;

/// Converts a basic glob pattern to a regular expression.
///
/// # Example
///
/// ```
/// use nunitlint::glob_to_regex;
/// let re = glob_to_regex("tests/*.json").unwrap();
/// assert!(re.is_match("tests/unit.json"));
/// ```
pub fn glob_to_regex(pat: &str) -> Result<Regex, regex::Error> {
    if pat.contains('[') || pat.contains(']') {
        // Character classes are not supported.
        return Regex::new("[");
    }
    let mut regex = String::from("^");
    let mut chars = pat.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    regex.push_str(".*");
                } else {
                    regex.push_str("[^/]*");
                }
            }
            '?' => regex.push('.'),
            '.' => regex.push_str("\\."),
            '(' | ')' | '+' | '|' | '^' | '$' | '{' | '}' | '\\' => {
                regex.push('\\');
                regex.push(c);
            }
            _ => regex.push(c),
        }
    }
    regex.push('$');
    Regex::new(&regex)
}

/// Transforms a glob-style exclusion string into [`Regex`].
/// Trailing slashes expand to `**`.
///
/// # Example
///
/// ```
/// use nunitlint::parse_exclude;
/// let re = parse_exclude("obj/").unwrap();
/// assert!(re.is_match("obj/Debug/units.json"));
/// ```
pub fn parse_exclude(s: &str) -> Result<Regex, String> {
    let glob_str = if s.ends_with('/') {
        format!("{s}**")
    } else {
        s.to_string()
    };
    glob_to_regex(&glob_str).map_err(|e| e.to_string())
}

/// Build output and VCS metadata never hold compilation documents.
pub fn default_excludes() -> Vec<Regex> {
    ["**/bin/**", "**/obj/**", "**/.git/**"]
        .iter()
        .filter_map(|p| parse_exclude(p).ok())
        .collect()
}

/// Indicates whether a path matches any exclusion pattern.
/// Separators are normalised to support Windows and Unix.
///
/// # Example
///
/// ```
/// use nunitlint::{is_excluded, parse_exclude};
/// use std::path::Path;
/// let patterns = vec![parse_exclude("generated/**").unwrap()];
/// assert!(is_excluded(Path::new("generated/a.json"), &patterns));
/// ```
pub fn is_excluded(path: &Path, patterns: &[Regex]) -> bool {
    let path_str = path.to_string_lossy().replace('\\', "/");
    patterns.iter().any(|re| re.is_match(&path_str))
}
