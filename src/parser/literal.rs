//! Recursive-descent parser for dump literals.
//!
//! The profiler writes each dump as a single mapping literal in the syntax of
//! its scripting front end: `{"key" : value, ...}` with integer-keyed
//! sub-mappings for histograms. This parser accepts only data: mappings,
//! lists, tuples, quoted strings, numbers, `True`, `False` and `None`.
//! Identifiers, calls and operators are rejected with a located error.

use super::value::{Distribution, Record, Value};
use crate::utils::error::ParseError;

/// Nesting bound for mappings and sequences
const MAX_DEPTH: usize = 64;

/// Parse a complete literal; trailing non-whitespace is an error
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError` - malformed literal, with 1-based line and column
pub fn parse_literal(input: &str) -> Result<Value, ParseError> {
    let mut parser = Parser::new(input);
    parser.skip_trivia();
    let value = parser.parse_value(0)?;
    parser.skip_trivia();
    if let Some(c) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing content '{}'", c)));
    }
    Ok(value)
}

/// Parse a literal that must be a string-keyed mapping
pub fn parse_record(input: &str) -> Result<Record, ParseError> {
    match parse_literal(input)? {
        Value::Record(record) => Ok(record),
        other => Err(ParseError {
            line: 1,
            column: 1,
            message: format!("top-level literal must be a mapping, found {}", other.kind()),
        }),
    }
}

/// Mapping key before classification
enum Key {
    Str(String),
    Int(i64),
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column,
            message: message.into(),
        }
    }

    fn error_at(&self, (line, column): (usize, usize), message: impl Into<String>) -> ParseError {
        ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    fn location(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Whitespace and `#` comments
    fn skip_trivia(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", wanted, c))),
            None => Err(self.error(format!("expected '{}', found end of input", wanted))),
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, ParseError> {
        match self.peek() {
            Some('{') => self.parse_mapping(depth + 1),
            Some('[') => self.parse_list(depth + 1),
            Some('(') => self.parse_tuple(depth + 1),
            Some('"') | Some('\'') => Ok(Value::Str(self.parse_strings()?)),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => {
                self.parse_number()
            }
            Some(c) if c.is_alphabetic() || c == '_' => self.parse_keyword(),
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ParseError> {
        if depth > MAX_DEPTH {
            return Err(self.error(format!("nesting deeper than {} levels", MAX_DEPTH)));
        }
        Ok(())
    }

    fn parse_mapping(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.check_depth(depth)?;
        let start = self.location();
        self.expect('{')?;

        let mut entries: Vec<(Key, Value)> = Vec::new();
        loop {
            self.skip_trivia();
            if self.peek() == Some('}') {
                self.bump();
                break;
            }

            let key = self.parse_key()?;
            self.skip_trivia();
            self.expect(':')?;
            self.skip_trivia();
            let value = self.parse_value(depth)?;
            entries.push((key, value));

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {
                    self.bump();
                    break;
                }
                Some(c) => return Err(self.error(format!("expected ',' or '}}', found '{}'", c))),
                None => return Err(self.error("unterminated mapping")),
            }
        }

        self.classify_mapping(start, entries)
    }

    fn parse_key(&mut self) -> Result<Key, ParseError> {
        match self.peek() {
            Some('"') | Some('\'') => Ok(Key::Str(self.parse_strings()?)),
            Some(c) if c == '-' || c == '+' || c.is_ascii_digit() => {
                let at = self.location();
                match self.parse_number()? {
                    Value::Int(n) => Ok(Key::Int(n)),
                    _ => Err(self.error_at(at, "mapping keys must be strings or integers")),
                }
            }
            Some(c) => Err(self.error(format!("unexpected mapping key starting with '{}'", c))),
            None => Err(self.error("unterminated mapping")),
        }
    }

    /// String keys make a record, integer keys with count values make a
    /// distribution, and anything in between is rejected.
    fn classify_mapping(
        &self,
        start: (usize, usize),
        entries: Vec<(Key, Value)>,
    ) -> Result<Value, ParseError> {
        if entries.iter().all(|(k, _)| matches!(k, Key::Str(_))) {
            let record = entries
                .into_iter()
                .filter_map(|(k, v)| match k {
                    Key::Str(s) => Some((s, v)),
                    Key::Int(_) => None,
                })
                .collect::<Record>();
            return Ok(Value::Record(record));
        }

        if !entries.iter().all(|(k, _)| matches!(k, Key::Int(_))) {
            return Err(self.error_at(start, "mapping mixes string and integer keys"));
        }

        let mut dist = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let Key::Int(k) = key else { continue };
            match value {
                Value::Int(count) if count >= 0 => dist.push((k, count as u64)),
                other => {
                    return Err(self.error_at(
                        start,
                        format!(
                            "integer-keyed mapping must hold non-negative counts, found {} at key {}",
                            other, k
                        ),
                    ))
                }
            }
        }
        Ok(Value::Dist(dist.into_iter().collect::<Distribution>()))
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.check_depth(depth)?;
        self.expect('[')?;
        let (items, _) = self.parse_sequence(']', depth)?;
        Ok(Value::List(items))
    }

    /// `(x)` is just a parenthesized value; `(x,)` and `()` are sequences
    fn parse_tuple(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.check_depth(depth)?;
        self.expect('(')?;
        let (mut items, trailing_comma) = self.parse_sequence(')', depth)?;
        if items.len() == 1 && !trailing_comma {
            return Ok(items.remove(0));
        }
        Ok(Value::List(items))
    }

    fn parse_sequence(
        &mut self,
        close: char,
        depth: usize,
    ) -> Result<(Vec<Value>, bool), ParseError> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            self.skip_trivia();
            if self.peek() == Some(close) {
                self.bump();
                return Ok((items, trailing_comma));
            }

            items.push(self.parse_value(depth)?);
            trailing_comma = false;

            self.skip_trivia();
            match self.peek() {
                Some(',') => {
                    self.bump();
                    trailing_comma = true;
                }
                Some(c) if c == close => {
                    self.bump();
                    return Ok((items, trailing_comma));
                }
                Some(c) => {
                    return Err(self.error(format!("expected ',' or '{}', found '{}'", close, c)))
                }
                None => return Err(self.error("unterminated sequence")),
            }
        }
    }

    /// Adjacent string literals concatenate
    fn parse_strings(&mut self) -> Result<String, ParseError> {
        let mut out = self.parse_string()?;
        loop {
            let save = (self.pos, self.line, self.column);
            self.skip_trivia();
            if matches!(self.peek(), Some('"') | Some('\'')) {
                out.push_str(&self.parse_string()?);
            } else {
                (self.pos, self.line, self.column) = save;
                return Ok(out);
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.location();
        let quote = match self.bump() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error_at(start, "expected string")),
        };

        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(self.error_at(start, "unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.parse_escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    /// Byte-string escapes. Anything else (`\l`, `\u`) is kept as a
    /// backslash and the character
    fn parse_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let at = self.location();
        let c = self
            .bump()
            .ok_or_else(|| self.error("unterminated escape sequence"))?;
        let escaped = match c {
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            '0' => '\0',
            'x' => self.parse_hex_escape(2, at)?,
            other => {
                out.push('\\');
                other
            }
        };
        out.push(escaped);
        Ok(())
    }

    fn parse_hex_escape(&mut self, digits: usize, at: (usize, usize)) -> Result<char, ParseError> {
        let mut code = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| self.error_at(at, "invalid hex escape"))?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or_else(|| self.error_at(at, "escape is not a valid character"))
    }

    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.location();
        let mut text = String::new();
        let mut is_float = false;

        if let Some(sign @ ('-' | '+')) = self.peek() {
            text.push(sign);
            self.bump();
        }

        let mut digits = 0;
        while let Some(c) = self.peek().filter(char::is_ascii_digit) {
            text.push(c);
            self.bump();
            digits += 1;
        }

        if self.peek() == Some('.') {
            is_float = true;
            text.push('.');
            self.bump();
            while let Some(c) = self.peek().filter(char::is_ascii_digit) {
                text.push(c);
                self.bump();
                digits += 1;
            }
        }

        if digits == 0 {
            return Err(self.error_at(start, "expected digits"));
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent_has_digits = match self.peek_at(1) {
                Some('-' | '+') => self.peek_at(2).is_some_and(|c| c.is_ascii_digit()),
                Some(c) => c.is_ascii_digit(),
                None => false,
            };
            if !exponent_has_digits {
                return Err(self.error("malformed exponent"));
            }
            is_float = true;
            for _ in 0..2 {
                if let Some(c) = self.peek().filter(|c| !c.is_ascii_digit()) {
                    text.push(c);
                    self.bump();
                }
            }
            while let Some(c) = self.peek().filter(char::is_ascii_digit) {
                text.push(c);
                self.bump();
            }
        }

        if !is_float && matches!(self.peek(), Some('L' | 'l')) {
            self.bump();
        }

        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.error("unexpected character after number"));
        }

        if is_float {
            text.parse::<f64>()
                .map(Value::Float)
                .map_err(|e| self.error_at(start, format!("invalid float '{}': {}", text, e)))
        } else {
            text.parse::<i64>()
                .map(Value::Int)
                .map_err(|e| self.error_at(start, format!("invalid integer '{}': {}", text, e)))
        }
    }

    fn parse_keyword(&mut self) -> Result<Value, ParseError> {
        let start = self.location();
        let mut word = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric() || *c == '_') {
            word.push(c);
            self.bump();
        }

        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::None),
            _ => Err(self.error_at(
                start,
                format!("'{}' is not a literal; only data values are accepted", word),
            )),
        }
    }
}
