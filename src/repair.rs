//! Recovery of JSON documents with dangling commas.
//!
//! Lead exports are appended incrementally and often end up with a comma right
//! before a closing `]` or `}`. Recovery runs in two stages:
//!
//! 1. A quick substitution of `,\n]` and `,\n}`, always applied.
//! 2. If strict parsing still fails, a line scan that drops the trailing comma
//!    of any line whose next non-blank line opens with `]` or `}`, followed by
//!    a sweep for commas sitting right before a closer on the same line
//!    (`[{...},]`). The sweep skips string contents.
//!
//! There is no third attempt. Everything here is pure text processing.

use crate::errors::AppError;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Which stage produced the parsed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPass {
    /// Parsed after the quick substitution.
    Strict,
    /// Needed the fallback stage.
    LineScan,
}

/// A successfully parsed document and how it was obtained.
#[derive(Debug, Clone)]
pub struct RepairedJson {
    pub value: Value,
    pub pass: RepairPass,
    /// Parser message of the failed strict attempt, set for [`RepairPass::LineScan`].
    pub strict_error: Option<String>,
}

fn dangling_comma_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",\n([\]}])").expect("static regex is valid"))
}

/// Replaces `,\n]` with `\n]` and `,\n}` with `\n}`.
pub fn strip_dangling_commas(content: &str) -> String {
    dangling_comma_re().replace_all(content, "\n$1").into_owned()
}

/// Drops the trailing comma of every line whose next non-blank line starts with `}` or `]`.
pub fn strip_commas_before_closers(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut fixed = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let closes_next = line.trim().ends_with(',')
            && lines[i + 1..]
                .iter()
                .map(|next| next.trim())
                .find(|next| !next.is_empty())
                .is_some_and(|next| next.starts_with('}') || next.starts_with(']'));

        if closes_next {
            fixed.push(line.trim_end().trim_end_matches(','));
        } else {
            fixed.push(line);
        }
    }

    fixed.join("\n")
}

/// Removes commas whose next non-whitespace character is `]` or `}`, outside strings.
pub fn strip_inline_trailing_commas(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let mut out = String::with_capacity(content.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
                if !matches!(next, Some(']') | Some('}')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Parses `content` as JSON, repairing dangling commas along the way.
pub fn parse_with_repair(content: &str) -> Result<RepairedJson, AppError> {
    let content = strip_dangling_commas(content);

    let strict_error = match serde_json::from_str::<Value>(&content) {
        Ok(value) => {
            return Ok(RepairedJson {
                value,
                pass: RepairPass::Strict,
                strict_error: None,
            })
        }
        Err(e) => e.to_string(),
    };

    tracing::debug!("Strict parse failed ({}), running line scan", strict_error);
    let rescanned = strip_inline_trailing_commas(&strip_commas_before_closers(&content));
    let value = serde_json::from_str::<Value>(&rescanned).map_err(|e| {
        tracing::warn!("Repair failed; first parse error was: {}", strict_error);
        AppError::MalformedInput(format!("{} (before repair: {})", e, strict_error))
    })?;

    Ok(RepairedJson {
        value,
        pass: RepairPass::LineScan,
        strict_error: Some(strict_error),
    })
}

/// Top-level array of raw lead records.
#[derive(Debug, Clone)]
pub struct LeadArray {
    pub records: Vec<Value>,
    pub pass: RepairPass,
    pub strict_error: Option<String>,
}

/// Parses `content` and requires the top-level value to be an array of records.
pub fn parse_lead_array(content: &str) -> Result<LeadArray, AppError> {
    let repaired = parse_with_repair(content)?;
    match repaired.value {
        Value::Array(records) => Ok(LeadArray {
            records,
            pass: repaired.pass,
            strict_error: repaired.strict_error,
        }),
        other => Err(AppError::MalformedInput(format!(
            "expected a JSON array of leads at the top level, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
