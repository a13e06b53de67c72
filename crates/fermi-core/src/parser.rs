//! Question bank parser.
//!
//! Normalizes the payload shapes a bank can arrive in (a flat JSON array,
//! JSON grouped by source, a JavaScript global, or a TOML file) into a flat
//! `QuestionBank`. Entries that are missing a field are skipped, not fatal.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::BankError;
use crate::model::{BankFormat, Question, QuestionBank};

/// One entry as it appears in a payload, before validation.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default, alias = "question", alias = "q")]
    text: Option<String>,
    #[serde(
        default,
        alias = "correctOrder",
        alias = "correct_order",
        alias = "answer",
        alias = "a"
    )]
    order: Option<f64>,
    #[serde(default)]
    source: Option<String>,
}

impl RawEntry {
    fn into_question(self, group: Option<&str>) -> Option<Question> {
        let text = self.text?.trim().to_string();
        if text.is_empty() {
            return None;
        }

        let order = self.order?;
        if order.fract() != 0.0 || order < f64::from(i32::MIN) || order > f64::from(i32::MAX) {
            return None;
        }

        Some(Question {
            text,
            correct_order: order as i32,
            source: group.map(str::to_string).or(self.source),
        })
    }
}

/// Parse a payload string into a `QuestionBank`.
///
/// `origin` names where the payload came from (a path or URL) and only
/// appears in error messages.
pub fn parse_bank_str(
    content: &str,
    format: BankFormat,
    origin: &str,
) -> std::result::Result<QuestionBank, BankError> {
    let format = match format {
        BankFormat::Auto => detect_format(content),
        other => other,
    };

    let questions = match format {
        BankFormat::Json | BankFormat::Auto => {
            let value: Value = serde_json::from_str(content)
                .map_err(|e| malformed(format, origin, e.to_string()))?;
            collect_json(value, format, origin)?
        }
        BankFormat::Script => {
            let literal = extract_script_literal(content).ok_or_else(|| {
                malformed(format, origin, "no array or object literal found".into())
            })?;
            let json = js_literal_to_json(literal);
            let value: Value = serde_json::from_str(&json)
                .map_err(|e| malformed(format, origin, e.to_string()))?;
            collect_json(value, format, origin)?
        }
        BankFormat::Toml => collect_toml(content, origin)?,
    };

    if questions.is_empty() {
        return Err(BankError::Empty(origin.to_string()));
    }

    tracing::debug!(count = questions.len(), %format, origin, "parsed question bank");
    Ok(QuestionBank::new(questions))
}

/// Parse a single bank file. The format follows the file extension.
pub fn parse_bank_file(path: &Path) -> Result<QuestionBank> {
    parse_bank_file_as(path, BankFormat::Auto)
}

fn parse_bank_file_as(path: &Path, format: BankFormat) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    let format = match format {
        BankFormat::Auto => format_for_path(path),
        explicit => explicit,
    };
    let bank = parse_bank_str(&content, format, &path.display().to_string())?;
    Ok(bank)
}

/// Recursively load and merge every bank file in a directory.
///
/// With `BankFormat::Auto` each file is parsed by its extension; any other
/// format is applied to every file.
pub fn load_bank_directory(dir: &Path, format: BankFormat) -> Result<QuestionBank> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.path());

    let mut questions = Vec::new();
    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            match load_bank_directory(&path, format) {
                Ok(bank) => questions.extend(bank.questions),
                Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
            }
        } else if is_bank_file(&path) {
            match parse_bank_file_as(&path, format) {
                Ok(bank) => questions.extend(bank.questions),
                Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
            }
        }
    }

    if questions.is_empty() {
        return Err(BankError::Empty(dir.display().to_string()).into());
    }
    Ok(QuestionBank::new(questions))
}

fn is_bank_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "json" || ext == "js" || ext == "toml")
}

/// Pick a format from a file extension, falling back to detection.
pub fn format_for_path(path: &Path) -> BankFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => BankFormat::Json,
        Some("js") => BankFormat::Script,
        Some("toml") => BankFormat::Toml,
        _ => BankFormat::Auto,
    }
}

/// Guess the format of a payload from its contents.
pub fn detect_format(content: &str) -> BankFormat {
    if content
        .lines()
        .any(|line| line.trim() == "[[questions]]")
    {
        return BankFormat::Toml;
    }
    match content.trim_start().chars().next() {
        Some('[') | Some('{') => BankFormat::Json,
        _ => BankFormat::Script,
    }
}

fn malformed(format: BankFormat, origin: &str, message: String) -> BankError {
    BankError::Malformed {
        format: format.to_string(),
        origin: origin.to_string(),
        message,
    }
}

fn collect_json(
    value: Value,
    format: BankFormat,
    origin: &str,
) -> std::result::Result<Vec<Question>, BankError> {
    match value {
        Value::Array(items) => Ok(normalize_entries(items, None, origin)),
        Value::Object(groups) => {
            let mut questions = Vec::new();
            for (source, entries) in groups {
                match entries {
                    Value::Array(items) => {
                        questions.extend(normalize_entries(items, Some(&source), origin));
                    }
                    _ => tracing::warn!(origin, %source, "skipping group that is not a list"),
                }
            }
            Ok(questions)
        }
        _ => Err(malformed(
            format,
            origin,
            "expected a list of questions or an object keyed by source".into(),
        )),
    }
}

fn normalize_entries(items: Vec<Value>, group: Option<&str>, origin: &str) -> Vec<Question> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let question = serde_json::from_value::<RawEntry>(item)
                .ok()
                .and_then(|raw| raw.into_question(group));
            if question.is_none() {
                tracing::warn!(origin, group, index = i, "skipping invalid question entry");
            }
            question
        })
        .collect()
}

fn collect_toml(content: &str, origin: &str) -> std::result::Result<Vec<Question>, BankError> {
    let parsed: toml::Table = toml::from_str(content)
        .map_err(|e| malformed(BankFormat::Toml, origin, e.to_string()))?;

    let Some(toml::Value::Array(items)) = parsed.get("questions").cloned() else {
        return Err(malformed(
            BankFormat::Toml,
            origin,
            "missing [[questions]] tables".into(),
        ));
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let question = item
                .try_into::<RawEntry>()
                .ok()
                .and_then(|raw| raw.into_question(None));
            if question.is_none() {
                tracing::warn!(origin, index = i, "skipping invalid question entry");
            }
            question
        })
        .collect())
}

/// Find the array or object literal a script assigns, e.g. the `[...]` in
/// `window.QUESTIONS = [...];`. A bare literal with no assignment also works.
fn extract_script_literal(content: &str) -> Option<&str> {
    let code = code_chars(content);

    // The first bare `=`, not part of `==`, `!=`, `<=`, `>=` or `=>`.
    let assignment = code.iter().enumerate().find_map(|(pos, &(i, c))| {
        if c != '=' {
            return None;
        }
        let prev = content[..i].chars().next_back();
        let next = content[i + 1..].chars().next();
        let is_assignment = !matches!(prev, Some('=' | '!' | '<' | '>'))
            && !matches!(next, Some('=' | '>'));
        is_assignment.then_some(pos + 1)
    });

    let from = assignment.unwrap_or(0);
    let open = from
        + code[from..]
            .iter()
            .position(|&(_, c)| matches!(c, '[' | '{'))?;
    let start = code[open].0;

    let mut depth = 0usize;
    for &(i, c) in &code[open..] {
        match c {
            '[' | '{' => depth += 1,
            ']' | '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&content[start..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte offsets and characters of `content` outside string literals and
/// comments.
fn code_chars(content: &str) -> Vec<(usize, char)> {
    let mut code = Vec::new();
    let mut quote: Option<char> = None;
    let mut chars = content.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '/' if chars.peek().is_some_and(|&(_, n)| n == '/') => {
                for (_, n) in chars.by_ref() {
                    if n == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek().is_some_and(|&(_, n)| n == '*') => {
                chars.next();
                let mut prev = ' ';
                for (_, n) in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            _ => code.push((i, c)),
        }
    }
    code
}

/// Rewrite a JavaScript object/array literal as JSON: quote bare keys,
/// turn single-quoted and template strings into double-quoted ones, and
/// drop comments and trailing commas.
fn js_literal_to_json(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                out.push('"');
                while let Some(s) = chars.next() {
                    match s {
                        '\\' => match chars.next() {
                            Some('\'') => out.push('\''),
                            Some('`') => out.push('`'),
                            Some(e) => {
                                out.push('\\');
                                out.push(e);
                            }
                            None => {}
                        },
                        '"' if c != '"' => out.push_str("\\\""),
                        '\n' => out.push_str("\\n"),
                        s if s == c => break,
                        s => out.push(s),
                    }
                }
                out.push('"');
            }
            '/' if chars.peek() == Some(&'/') => {
                for n in chars.by_ref() {
                    if n == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = ' ';
                for n in chars.by_ref() {
                    if prev == '*' && n == '/' {
                        break;
                    }
                    prev = n;
                }
            }
            ']' | '}' => {
                let trimmed = out.trim_end().len();
                if out[..trimmed].ends_with(',') {
                    out.truncate(trimmed - 1);
                }
                out.push(c);
            }
            c if c.is_ascii_digit() || c == '.' => {
                out.push(c);
                let mut prev = c;
                while let Some(&n) = chars.peek() {
                    let exponent_sign = (n == '+' || n == '-') && matches!(prev, 'e' | 'E');
                    if n.is_ascii_alphanumeric() || n == '.' || exponent_sign {
                        out.push(n);
                        prev = n;
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                let mut ident = String::from(c);
                while let Some(&n) = chars.peek() {
                    if n.is_alphanumeric() || n == '_' || n == '$' {
                        ident.push(n);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let is_key = chars
                    .clone()
                    .find(|n| !n.is_whitespace())
                    .is_some_and(|n| n == ':');
                if is_key {
                    out.push('"');
                    out.push_str(&ident);
                    out.push('"');
                } else {
                    out.push_str(&ident);
                }
            }
            c => out.push(c),
        }
    }

    out
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Position of the question in the bank.
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen = HashMap::new();
    for (i, q) in bank.iter().enumerate() {
        match seen.entry(q.text.to_lowercase()) {
            Entry::Occupied(first) => warnings.push(ValidationWarning {
                index: Some(i),
                message: format!(
                    "duplicate question (first seen at #{}): {}",
                    first.get() + 1,
                    q.text
                ),
            }),
            Entry::Vacant(slot) => {
                slot.insert(i);
            }
        }
    }

    for (i, q) in bank.iter().enumerate() {
        if q.correct_order.unsigned_abs() > 100 {
            warnings.push(ValidationWarning {
                index: Some(i),
                message: format!("unusually large exponent 10^{}", q.correct_order),
            });
        }
    }

    warnings
}
