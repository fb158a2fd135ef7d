//! Path patterns and envelope rewriting over JSON trees
//!
//! A pattern is a dot-separated list of segments. Each segment is either a
//! literal (matching an object key or a decimal array index) or the `**`
//! wildcard, which matches any run of segments including the empty one, so
//! `**.trigger` matches `trigger` at the root as well as `a.b.trigger`.
//!
//! Matching is implemented as a small NFA: a set of pattern positions is
//! carried down a recursive descent over the tree, advanced per key/index.
//! This covers every pattern the fixed rule set needs without pulling in a
//! query-language dependency.

use std::str::FromStr;

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::ShapeError;
use crate::result::Result;

/// One segment of a path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches an object key or decimal array index equal to the literal
    Literal(String),
    /// `**`: matches any key or index across any number of levels
    Wildcard,
}

/// A compiled path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl FromStr for PathPattern {
    type Err = ShapeError;

    fn from_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(ShapeError::pattern_error(text, "pattern is empty"));
        }
        let segments = text
            .split('.')
            .map(|segment| match segment {
                "" => Err(ShapeError::pattern_error(text, "empty path segment")),
                "**" => Ok(Segment::Wildcard),
                literal => Ok(Segment::Literal(literal.to_string())),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }
}

impl PathPattern {
    /// Segments of this pattern, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Initial NFA state set (pattern positions active at the root)
    fn start(&self) -> Vec<usize> {
        let mut states = vec![0];
        self.close(&mut states);
        states
    }

    /// Epsilon closure: a wildcard may match zero segments, so a state
    /// sitting on a wildcard also activates the position after it.
    fn close(&self, states: &mut Vec<usize>) {
        let mut i = 0;
        while i < states.len() {
            let at = states[i];
            if at < self.segments.len()
                && self.segments[at] == Segment::Wildcard
                && !states.contains(&(at + 1))
            {
                states.push(at + 1);
            }
            i += 1;
        }
    }

    /// Advance the state set across one edge labelled `key`
    fn step(&self, states: &[usize], key: &str) -> Vec<usize> {
        let mut next = Vec::new();
        for &at in states {
            if at >= self.segments.len() {
                continue;
            }
            match &self.segments[at] {
                // stay on the wildcard; closure re-adds the position after it
                Segment::Wildcard => {
                    if !next.contains(&at) {
                        next.push(at);
                    }
                }
                Segment::Literal(literal) if literal == key => {
                    if !next.contains(&(at + 1)) {
                        next.push(at + 1);
                    }
                }
                Segment::Literal(_) => {}
            }
        }
        self.close(&mut next);
        next
    }

    /// Whether a state set accepts (the position it sits on is matched)
    fn accepts(&self, states: &[usize]) -> bool {
        states.contains(&self.segments.len())
    }
}

/// Rewrite every position of `tree` matched by `pattern`: a matched position
/// holding an object whose only key is `envelope_key` is replaced by the
/// wrapped value. Everything else is left untouched. Always builds a new
/// tree; the same inputs always produce the same output.
pub fn rewrite(tree: &Value, pattern: &PathPattern, envelope_key: &str) -> Value {
    rewrite_at(tree, pattern, &pattern.start(), envelope_key)
}

fn rewrite_at(tree: &Value, pattern: &PathPattern, states: &[usize], envelope_key: &str) -> Value {
    let unwrapped = if pattern.accepts(states) {
        unwrap_envelope(tree, envelope_key)
    } else {
        tree.clone()
    };
    match unwrapped {
        Value::Object(fields) => {
            let rebuilt: Map<String, Value> = fields
                .into_iter()
                .map(|(key, value)| {
                    let next = pattern.step(states, &key);
                    let value = if next.is_empty() {
                        value
                    } else {
                        rewrite_at(&value, pattern, &next, envelope_key)
                    };
                    (key, value)
                })
                .collect();
            Value::Object(rebuilt)
        }
        Value::Array(items) => {
            let rebuilt: Vec<Value> = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| {
                    let next = pattern.step(states, &index.to_string());
                    if next.is_empty() {
                        item
                    } else {
                        rewrite_at(&item, pattern, &next, envelope_key)
                    }
                })
                .collect();
            Value::Array(rebuilt)
        }
        scalar => scalar,
    }
}

/// Strip one level of envelope nesting if `value` is a single-key object
/// holding exactly `envelope_key`; otherwise return the value unchanged.
fn unwrap_envelope(value: &Value, envelope_key: &str) -> Value {
    match value.as_object() {
        Some(fields) if fields.len() == 1 && fields.contains_key(envelope_key) => {
            trace!(key = envelope_key, "unwrapping envelope");
            fields[envelope_key].clone()
        }
        _ => value.clone(),
    }
}
