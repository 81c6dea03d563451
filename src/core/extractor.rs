//! Path expressions over arbitrary JSON documents.
//!
//! Supports a JSONPath-like subset:
//! - `$` - the document root (optional)
//! - `.name`, `name` - field of a mapping
//! - `.*`, `[*]` - every child of a mapping or sequence
//! - `[0]`, `[-1]` - sequence index, negative counts from the end
//! - `['name']`, `["name"]` - quoted field name
//! - `['a', 0]` - union of bracket selectors
//! - `..name`, `..*`, `..[0]` - the same selectors applied at any depth
//!
//! Matches are returned in document order: a node before its children,
//! sequence elements by ascending index, mapping fields in source order.

use crate::utils::error::{GeneQueryError, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Name(String),
    Index(i64),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Applies to the direct children of each node.
    Child(Vec<Selector>),
    /// Applies to each node and all of its descendants.
    Descendant(Vec<Selector>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    source: String,
    segments: Vec<Segment>,
}

impl PathExpression {
    pub fn parse(expression: &str) -> Result<Self> {
        let source = expression.trim();
        let segments = Parser::new(source)
            .parse_path()
            .map_err(|e| GeneQueryError::InvalidPath {
                expression: source.to_string(),
                position: e.position,
                message: e.message,
            })?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn select<'a>(&self, document: &'a Value) -> Vec<&'a Value> {
        let mut nodes = vec![document];

        for segment in &self.segments {
            let mut next = Vec::new();
            for node in nodes {
                match segment {
                    Segment::Child(selectors) => apply_selectors(node, selectors, &mut next),
                    Segment::Descendant(selectors) => {
                        let mut visited = Vec::new();
                        collect_descendants(node, &mut visited);
                        for descendant in visited {
                            apply_selectors(descendant, selectors, &mut next);
                        }
                    }
                }
            }
            nodes = next;
        }

        nodes
    }
}

impl FromStr for PathExpression {
    type Err = GeneQueryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Parses `expression` and returns owned copies of every match in `document`.
pub fn extract(document: &Value, expression: &str) -> Result<Vec<Value>> {
    let path = PathExpression::parse(expression)?;
    Ok(path.select(document).into_iter().cloned().collect())
}

/// Pre-order walk: the node itself, then its children.
fn collect_descendants<'a>(value: &'a Value, results: &mut Vec<&'a Value>) {
    results.push(value);

    match value {
        Value::Array(items) => {
            for item in items {
                collect_descendants(item, results);
            }
        }
        Value::Object(fields) => {
            for field in fields.values() {
                collect_descendants(field, results);
            }
        }
        _ => {}
    }
}

fn apply_selectors<'a>(node: &'a Value, selectors: &[Selector], out: &mut Vec<&'a Value>) {
    for selector in selectors {
        match (selector, node) {
            (Selector::Name(name), Value::Object(fields)) => {
                if let Some(value) = fields.get(name) {
                    out.push(value);
                }
            }
            (Selector::Wildcard, Value::Object(fields)) => out.extend(fields.values()),
            (Selector::Wildcard, Value::Array(items)) => out.extend(items.iter()),
            (Selector::Index(index), Value::Array(items)) => {
                if let Some(value) = resolve_index(*index, items.len()).and_then(|i| items.get(i)) {
                    out.push(value);
                }
            }
            _ => {}
        }
    }
}

fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        usize::try_from(index).ok()
    } else {
        let from_end = usize::try_from(index.unsigned_abs()).ok()?;
        len.checked_sub(from_end)
    }
}

#[derive(Debug)]
struct ParseError {
    message: String,
    position: usize,
}

impl ParseError {
    fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

type ParseResult<T> = std::result::Result<T, ParseError>;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn parse_path(&mut self) -> ParseResult<Vec<Segment>> {
        let mut segments = Vec::new();

        match self.peek() {
            None => return Err(ParseError::new("empty path expression", 0)),
            Some('$') => self.advance(),
            Some(c) if is_name_start(c) => {
                segments.push(Segment::Child(vec![Selector::Name(self.parse_name()?)]));
            }
            _ => {}
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.advance();
                    if self.peek() == Some('.') {
                        self.advance();
                        segments.push(Segment::Descendant(self.parse_descendant_selectors()?));
                    } else {
                        segments.push(Segment::Child(self.parse_member_selector()?));
                    }
                }
                '[' => segments.push(Segment::Child(self.parse_bracket()?)),
                other => {
                    return Err(ParseError::new(
                        format!("unexpected character '{}'", other),
                        self.pos,
                    ))
                }
            }
        }

        Ok(segments)
    }

    fn parse_member_selector(&mut self) -> ParseResult<Vec<Selector>> {
        match self.peek() {
            Some('*') => {
                self.advance();
                Ok(vec![Selector::Wildcard])
            }
            Some(c) if is_name_start(c) => Ok(vec![Selector::Name(self.parse_name()?)]),
            _ => Err(ParseError::new("expected field name or '*' after '.'", self.pos)),
        }
    }

    fn parse_descendant_selectors(&mut self) -> ParseResult<Vec<Selector>> {
        match self.peek() {
            Some('[') => self.parse_bracket(),
            Some('.') => Err(ParseError::new("too many '.' characters", self.pos)),
            _ => self.parse_member_selector(),
        }
    }

    fn parse_bracket(&mut self) -> ParseResult<Vec<Selector>> {
        let open = self.pos;
        self.advance();
        let mut selectors = Vec::new();

        loop {
            self.skip_whitespace();
            let selector = match self.peek() {
                Some('*') => {
                    self.advance();
                    Selector::Wildcard
                }
                Some(quote @ ('\'' | '"')) => Selector::Name(self.parse_quoted(quote)?),
                Some(c) if c == '-' || c.is_ascii_digit() => Selector::Index(self.parse_index()?),
                Some(']') => return Err(ParseError::new("empty brackets", self.pos)),
                Some(c) => {
                    return Err(ParseError::new(
                        format!("unexpected character '{}' in brackets", c),
                        self.pos,
                    ))
                }
                None => return Err(ParseError::new("unterminated '['", open)),
            };
            selectors.push(selector);

            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.advance(),
                Some(']') => {
                    self.advance();
                    return Ok(selectors);
                }
                Some(c) => {
                    return Err(ParseError::new(
                        format!("expected ',' or ']', found '{}'", c),
                        self.pos,
                    ))
                }
                None => return Err(ParseError::new("unterminated '['", open)),
            }
        }
    }

    fn parse_name(&mut self) -> ParseResult<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if is_name_char(c)) {
            self.advance();
        }
        if start == self.pos {
            return Err(ParseError::new("expected field name", start));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_quoted(&mut self, quote: char) -> ParseResult<String> {
        let start = self.pos;
        self.advance();
        let mut name = String::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::new("unterminated string", start)),
                Some('\\') => {
                    self.advance();
                    match self.peek() {
                        Some(c) => {
                            name.push(c);
                            self.advance();
                        }
                        None => return Err(ParseError::new("unterminated string", start)),
                    }
                }
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(name);
                }
                Some(c) => {
                    name.push(c);
                    self.advance();
                }
            }
        }
    }

    fn parse_index(&mut self) -> ParseResult<i64> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.advance();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| ParseError::new("invalid index", start))
    }
}

fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}
