//! Structure-preserving rewrite of transparent colors in a JSON document.
//!
//! Objects and arrays are walked recursively; keys are never scanned and key
//! order is preserved. Only string leaves change, and only in the spans where
//! a transparent color was found. Numbers, booleans and null are left alone.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::color::{self, DEFAULT_BACKGROUND, Rgb};
use crate::scan::{self, BoundaryPolicy, ColorMatch, Segment};

/// One transparent color that was (or would be) flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// JSON pointer (RFC 6901) of the string that contains the color.
    pub pointer: String,
    /// Byte offset of the color within that string.
    pub offset: usize,
    /// The matched text, as it appeared in the input.
    pub original: String,
    /// The opaque replacement text.
    pub replacement: String,
}

/// Flattens transparent colors against a fixed background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewriter {
    background: Rgb,
    policy: BoundaryPolicy,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(DEFAULT_BACKGROUND, BoundaryPolicy::default())
    }
}

impl Rewriter {
    pub const fn new(background: Rgb, policy: BoundaryPolicy) -> Self {
        Self { background, policy }
    }

    /// Rewrites every transparent color in `document`.
    pub fn rewrite(&self, document: Value) -> Value {
        self.rewrite_with_report(document).0
    }

    /// Rewrites `document` and lists what changed, in document order.
    #[instrument(skip_all, fields(background = %self.background, policy = ?self.policy))]
    pub fn rewrite_with_report(&self, mut document: Value) -> (Value, Vec<Replacement>) {
        let mut report = Vec::new();
        let mut pointer = String::new();
        self.walk_mut(&mut document, &mut pointer, &mut report);
        debug!(replacements = report.len(), "Document rewritten");
        (document, report)
    }

    /// Lists the replacements [`Self::rewrite`] would make, without touching
    /// the document.
    #[instrument(skip_all, fields(background = %self.background, policy = ?self.policy))]
    pub fn find(&self, document: &Value) -> Vec<Replacement> {
        let mut report = Vec::new();
        let mut pointer = String::new();
        self.walk(document, &mut pointer, &mut report);
        debug!(replacements = report.len(), "Document scanned");
        report
    }

    /// Rewrites a single string. Returns `None` when nothing changed.
    pub fn rewrite_str(&self, text: &str) -> Option<String> {
        self.rewrite_text(text, |_, _| {})
    }

    fn walk_mut(&self, value: &mut Value, pointer: &mut String, report: &mut Vec<Replacement>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map.iter_mut() {
                    let len = push_token(pointer, key);
                    self.walk_mut(child, pointer, report);
                    pointer.truncate(len);
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter_mut().enumerate() {
                    let len = push_token(pointer, &index.to_string());
                    self.walk_mut(child, pointer, report);
                    pointer.truncate(len);
                }
            }
            Value::String(text) => {
                let rewritten = self.rewrite_text(text, |m, replacement| {
                    report.push(record(pointer, m, replacement));
                });
                if let Some(new_text) = rewritten {
                    trace!(pointer = %pointer, "Rewrote string");
                    *text = new_text;
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    fn walk(&self, value: &Value, pointer: &mut String, report: &mut Vec<Replacement>) {
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let len = push_token(pointer, key);
                    self.walk(child, pointer, report);
                    pointer.truncate(len);
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate() {
                    let len = push_token(pointer, &index.to_string());
                    self.walk(child, pointer, report);
                    pointer.truncate(len);
                }
            }
            Value::String(text) => {
                self.rewrite_text(text, |m, replacement| {
                    report.push(record(pointer, m, replacement));
                });
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    /// Rebuilds `text` with transparent matches flattened, calling
    /// `on_replace` for each one. `None` if no match was transparent.
    fn rewrite_text(
        &self,
        text: &str,
        mut on_replace: impl FnMut(&ColorMatch<'_>, &str),
    ) -> Option<String> {
        let segments = scan::scan(text, self.policy);
        let mut out = String::with_capacity(text.len());
        let mut changed = false;

        for segment in &segments {
            match segment {
                Segment::Color(m) if m.is_transparent() => {
                    let replacement = self.flatten(m);
                    on_replace(m, &replacement);
                    out.push_str(&replacement);
                    changed = true;
                }
                other => out.push_str(other.as_str()),
            }
        }

        changed.then_some(out)
    }

    fn flatten(&self, m: &ColorMatch<'_>) -> String {
        color::flatten_token(m.text, self.background).unwrap_or_else(|_| m.text.to_string())
    }
}

fn record(pointer: &str, m: &ColorMatch<'_>, replacement: &str) -> Replacement {
    Replacement {
        pointer: pointer.to_string(),
        offset: m.offset,
        original: m.text.to_string(),
        replacement: replacement.to_string(),
    }
}

/// Appends an escaped JSON pointer reference token and returns the length to
/// truncate back to.
fn push_token(pointer: &mut String, token: &str) -> usize {
    let len = pointer.len();
    pointer.push('/');
    for c in token.chars() {
        match c {
            '~' => pointer.push_str("~0"),
            '/' => pointer.push_str("~1"),
            _ => pointer.push(c),
        }
    }
    len
}
