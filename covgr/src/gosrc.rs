//! Function-extent resolution for Go source files.
//!
//! A lightweight scanner rather than a full parser: it tracks lines,
//! byte columns, and brace depth while skipping comments, interpreted
//! and raw strings, and rune literals, and records every top-level
//! `func` declaration's span. Function literals nested inside bodies are
//! intentionally not reported, so the resulting extents are
//! position-sorted and non-overlapping by construction.

use std::path::Path;

use crate::coverage::model::FuncExtent;
use crate::error::CovgrError;

pub fn find_funcs(path: &Path) -> Result<Vec<FuncExtent>, CovgrError> {
    let text = std::fs::read_to_string(path).map_err(|source| CovgrError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(scan_source(&text))
}

pub fn scan_source(text: &str) -> Vec<FuncExtent> {
    let mut cur = Cursor::new(text);
    let mut funcs: Vec<FuncExtent> = vec![];
    let mut depth = 0i64;

    while let Some(b) = cur.peek() {
        match b {
            b'/' if cur.peek_at(1) == Some(b'/') => cur.skip_line_comment(),
            b'/' if cur.peek_at(1) == Some(b'*') => cur.skip_block_comment(),
            b'"' | b'\'' => cur.skip_quoted(b),
            b'`' => cur.skip_raw_string(),
            b'{' => {
                depth += 1;
                cur.bump();
            }
            b'}' => {
                depth -= 1;
                cur.bump();
            }
            _ if is_ident_start(b) => {
                let (line, col) = (cur.line, cur.col);
                let word = cur.read_ident();
                if word == "func" && depth == 0 {
                    if let Some(extent) = scan_func_decl(&mut cur, line, col) {
                        funcs.push(extent);
                    }
                }
            }
            _ => cur.bump(),
        }
    }
    funcs
}

/// Called with the cursor just past a top-level `func` keyword. Returns
/// the declaration's extent, or None for anything that is not a
/// function/method declaration with a body (type expressions, literals
/// bound to package variables, assembly stubs without bodies).
fn scan_func_decl(cur: &mut Cursor, start_line: u32, start_col: u32) -> Option<FuncExtent> {
    cur.skip_trivia();
    if cur.peek() == Some(b'(') {
        // Method receiver, or the parameter list of a func literal /
        // func type; the distinction falls out below.
        cur.skip_balanced(b'(', b')')?;
        cur.skip_trivia();
    }
    if !cur.peek().is_some_and(is_ident_start) {
        return None;
    }
    let name = cur.read_ident().to_string();
    if name == "func" {
        // `func() func() { ... }`: a literal returning a literal.
        return None;
    }
    cur.skip_trivia();
    if cur.peek() == Some(b'[') {
        // Type parameter list.
        cur.skip_balanced(b'[', b']')?;
        cur.skip_trivia();
    }
    if cur.peek() != Some(b'(') {
        // The identifier was a result type, so this was a func type or
        // literal, not a declaration.
        return None;
    }
    cur.skip_balanced(b'(', b')')?;
    find_body(cur)?;
    let (end_line, end_col) = cur.skip_balanced(b'{', b'}')?;
    Some(FuncExtent {
        name,
        start_line,
        start_col,
        end_line,
        // One past the closing brace.
        end_col: end_col + 1,
    })
}

/// Advances past the result type (if any) to the body's opening brace.
/// Returns None for bodyless declarations, which end at the first
/// newline outside any bracket nesting (Go's automatic semicolon).
/// Braces introduced by `struct`/`interface` result types are skipped.
fn find_body(cur: &mut Cursor) -> Option<()> {
    let mut level = 0i64;
    let mut last_ident: Option<&str> = None;
    loop {
        let b = cur.peek()?;
        match b {
            b'\n' if level == 0 => return None,
            b'/' if cur.peek_at(1) == Some(b'/') => cur.skip_line_comment(),
            b'/' if cur.peek_at(1) == Some(b'*') => cur.skip_block_comment(),
            b'"' | b'\'' => {
                cur.skip_quoted(b);
                last_ident = None;
            }
            b'`' => {
                cur.skip_raw_string();
                last_ident = None;
            }
            b'(' | b'[' => {
                level += 1;
                cur.bump();
                last_ident = None;
            }
            b')' | b']' => {
                level -= 1;
                cur.bump();
                last_ident = None;
            }
            b'{' if level == 0 => {
                if matches!(last_ident, Some("struct") | Some("interface")) {
                    cur.skip_balanced(b'{', b'}')?;
                    last_ident = None;
                } else {
                    return Some(());
                }
            }
            b'{' => {
                level += 1;
                cur.bump();
                last_ident = None;
            }
            b'}' => {
                level -= 1;
                cur.bump();
                last_ident = None;
            }
            _ if is_ident_start(b) => last_ident = Some(cur.read_ident()),
            _ if b.is_ascii_whitespace() => cur.bump(),
            _ => {
                cur.bump();
                last_ident = None;
            }
        }
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80 || b.is_ascii_digit()
}

fn is_ident_continue(b: u8) -> bool {
    is_ident_start(b)
}

struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Cursor {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn bump(&mut self) {
        if let Some(&b) = self.bytes.get(self.pos) {
            self.pos += 1;
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    fn read_ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.bump(),
                Some(b'/') if self.peek_at(1) == Some(b'/') => self.skip_line_comment(),
                Some(b'/') if self.peek_at(1) == Some(b'*') => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while self.peek().is_some_and(|b| b != b'\n') {
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) {
        self.bump();
        self.bump();
        while let Some(b) = self.peek() {
            if b == b'*' && self.peek_at(1) == Some(b'/') {
                self.bump();
                self.bump();
                return;
            }
            self.bump();
        }
    }

    /// Interpreted string or rune literal; backslash escapes respected,
    /// an unterminated literal ends at the line break.
    fn skip_quoted(&mut self, quote: u8) {
        self.bump();
        while let Some(b) = self.peek() {
            match b {
                b'\\' => {
                    self.bump();
                    self.bump();
                }
                b'\n' => return,
                _ if b == quote => {
                    self.bump();
                    return;
                }
                _ => self.bump(),
            }
        }
    }

    fn skip_raw_string(&mut self) {
        self.bump();
        while let Some(b) = self.peek() {
            self.bump();
            if b == b'`' {
                return;
            }
        }
    }

    /// Consumes a balanced delimiter pair, honoring comments and string
    /// literals in between. The cursor must sit on `open`; returns the
    /// line and column of the matching `close`, or None at EOF.
    fn skip_balanced(&mut self, open: u8, close: u8) -> Option<(u32, u32)> {
        if self.peek() != Some(open) {
            return None;
        }
        let mut depth = 0i64;
        while let Some(b) = self.peek() {
            if b == b'/' && self.peek_at(1) == Some(b'/') {
                self.skip_line_comment();
                continue;
            }
            if b == b'/' && self.peek_at(1) == Some(b'*') {
                self.skip_block_comment();
                continue;
            }
            if b == b'"' || b == b'\'' {
                self.skip_quoted(b);
                continue;
            }
            if b == b'`' {
                self.skip_raw_string();
                continue;
            }
            if b == open {
                depth += 1;
            } else if b == close {
                depth -= 1;
                if depth == 0 {
                    let at = (self.line, self.col);
                    self.bump();
                    return Some(at);
                }
            }
            self.bump();
        }
        None
    }
}
