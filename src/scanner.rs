//! Module `scanner` implements a one‑pass, streaming lexer for Sprig source text.
//!
//! It transforms a `&str` into a sequence of `Token<'a>`s and turns leading
//! whitespace into explicit block structure, so the parser never looks at raw
//! whitespace. Designed as a `FusedIterator`, it can be chained safely with other
//! iterator adapters; after the first error it yields nothing more.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//! - `Scanner::tokenize(src) -> Result<Vec<Token<'a>>>` collects up to the first error.
//! - `impl Iterator for Scanner<'a>` yields `Result<Token<'a>, SprigError>`.
//!
//! # Layout
//!
//! 1. **Logical lines**
//!    - A line holding only whitespace and/or a `//` comment is blank and is
//!      skipped without touching the indentation stack.
//!    - Every other line ends with exactly one `NEWLINE` token.
//!    - Inside `( … )` and `[ … ]` newlines and indentation are insignificant.
//!
//! 2. **Indentation stack** (starts as `[0]`)
//!    - The leading run of a logical line is measured in units: one tab, or
//!      four spaces. A run mixing both, or spaces not in groups of four, is a
//!      `LexError`.
//!    - Deeper than the top → push, emit `INDENT`. Shallower → pop, emitting one
//!      `DEDENT` per level, and the new top must equal the measured width
//!      ("inconsistent dedent" otherwise).
//!    - Each level remembers whether it was opened with tabs or spaces; later
//!      lines at that level must use the same form.
//!    - At end of input all open levels are closed with `DEDENT`, then `EOF`.
//!
//! 3. **Token Recognition** (`scan_token`)
//!    - Punctuators: `(` `)` `[` `]` `,` `:` `;` `*`.
//!    - Two‑character operators matched greedily: `++` `--` `!=` `==` `<=` `>=`.
//!    - String literals: `"` … `"`, no escapes, may span lines.
//!    - Numeric literals: digits with an optional fractional part.
//!    - Identifiers/keywords: alphanumeric/_ sequences, resolved via a perfect‑hash `KEYWORDS` map.
//!
//! # Example
//!
//! ```rust
//! use sprig_interpreter::scanner::Scanner;
//!
//! let source = "if ready:\n    print(1);\n";
//! for result in Scanner::new(source) {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("{}", err),
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::error::{Result, SprigError};
use crate::token::{Position, Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;

/// Spaces making up one indentation unit.
const SPACES_PER_LEVEL: usize = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and"    => TokenType::AND,
    b"def"    => TokenType::DEF,
    b"elif"   => TokenType::ELIF,
    b"else"   => TokenType::ELSE,
    b"false"  => TokenType::FALSE,
    b"for"    => TokenType::FOR,
    b"if"     => TokenType::IF,
    b"in"     => TokenType::IN,
    b"let"    => TokenType::LET,
    b"not"    => TokenType::NOT,
    b"null"   => TokenType::NULL,
    b"or"     => TokenType::OR,
    b"print"  => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"step"   => TokenType::STEP,
    b"true"   => TokenType::TRUE,
    b"while"  => TokenType::WHILE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndentStyle {
    Tabs,
    Spaces,
}

/// One entry of the indentation stack.
#[derive(Debug, Clone, Copy)]
struct Level {
    width: usize,
    style: Option<IndentStyle>,
}

const ROOT_LEVEL: Level = Level {
    width: 0,
    style: None,
};

/// A single pass **scanner / lexer** that converts source text into a
/// sequence of [`Token`]s. The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a str,
    start: usize,      // index of the *first* byte of the current lexeme
    curr: usize,       // index *one past* the last byte examined
    line: usize,       // 1‑based line counter (\n increments)
    line_start: usize, // byte index where the current line begins
    levels: Vec<Level>,
    at_line_start: bool,
    line_has_tokens: bool, // current logical line already produced a token
    nesting: usize,        // open ( and [
    queued: VecDeque<Token<'a>>,
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            line_start: 0,
            levels: vec![ROOT_LEVEL],
            at_line_start: true,
            line_has_tokens: false,
            nesting: 0,
            queued: VecDeque::new(),
            done: false,
        }
    }

    /// Scan the whole of `src`, stopping at the first error.
    pub fn tokenize(src: &'a str) -> Result<Vec<Token<'a>>> {
        Scanner::new(src).collect()
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    /// Advance one byte and return it. Callers guard with [`is_at_end`] or a
    /// non-zero [`peek`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Current byte, or `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.bytes().get(self.curr).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn peek_next(&self) -> u8 {
        self.bytes().get(self.curr + 1).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Bookkeeping after a `\n` has been consumed.
    #[inline(always)]
    fn newline(&mut self) {
        self.line += 1;
        self.line_start = self.curr;
    }

    fn column_of(&self, index: usize) -> usize {
        index - self.line_start + 1
    }

    fn current_level(&self) -> Level {
        self.levels.last().copied().unwrap_or(ROOT_LEVEL)
    }

    /// Skip a `//` comment up to (not including) the next newline.
    fn skip_comment(&mut self) {
        if let Some(pos) = memchr(b'\n', &self.bytes()[self.curr..]) {
            self.curr += pos;
        } else {
            self.curr = self.src.len();
        }
    }

    fn queue_layout(&mut self, token_type: TokenType) {
        let column = self.column_of(self.curr);
        self.queued
            .push_back(Token::new(token_type, "", self.line, column));
    }

    fn fail(&mut self, err: SprigError) -> Result<Token<'a>> {
        debug!("Scanner stopping on error: {}", err);

        self.done = true;
        self.queued.clear();
        Err(err)
    }

    // ───────────────────────────── layout ──────────────────────────────────

    /// Measure the leading whitespace of the line at `self.curr` and queue
    /// the `INDENT`/`DEDENT` tokens it implies. Blank and comment-only lines
    /// are consumed (or left for the next call) without touching the stack.
    fn measure_indentation(&mut self) -> Result<()> {
        let mut tabs: usize = 0;
        let mut spaces: usize = 0;

        loop {
            match self.peek() {
                b'\t' => tabs += 1,
                b' ' => spaces += 1,
                _ => break,
            }
            self.advance();
        }

        match self.peek() {
            b'\n' => {
                self.advance();
                self.newline();
                return Ok(());
            }
            b'\r' if self.peek_next() == b'\n' => {
                self.advance();
                self.advance();
                self.newline();
                return Ok(());
            }
            b'/' if self.peek_next() == b'/' => {
                self.skip_comment();
                return Ok(());
            }
            _ if self.is_at_end() => {
                self.at_line_start = false;
                return Ok(());
            }
            _ => {}
        }

        self.at_line_start = false;
        let position = Position::new(self.line, 1);

        let style: Option<IndentStyle> = match (tabs, spaces) {
            (0, 0) => None,
            (_, 0) => Some(IndentStyle::Tabs),
            (0, _) => Some(IndentStyle::Spaces),
            _ => {
                return Err(SprigError::lex(
                    position,
                    "Indentation mixes tabs and spaces.",
                ))
            }
        };

        let width: usize = match style {
            None => 0,
            Some(IndentStyle::Tabs) => tabs,
            Some(IndentStyle::Spaces) => {
                if spaces % SPACES_PER_LEVEL != 0 {
                    return Err(SprigError::lex(
                        position,
                        format!(
                            "Indentation of {} spaces is not a multiple of {}.",
                            spaces, SPACES_PER_LEVEL
                        ),
                    ));
                }
                spaces / SPACES_PER_LEVEL
            }
        };

        let top: usize = self.current_level().width;

        if width > top {
            debug!("Indent to width {} on line {}", width, self.line);
            self.levels.push(Level { width, style });
            self.queue_layout(TokenType::INDENT);
        } else if width < top {
            while self.current_level().width > width {
                debug!("Dedent from width {} on line {}", self.current_level().width, self.line);
                self.levels.pop();
                self.queue_layout(TokenType::DEDENT);
            }

            if self.current_level().width != width {
                return Err(SprigError::lex(
                    position,
                    "Inconsistent dedent: does not match any outer indentation level.",
                ));
            }
        }

        if width > 0 && self.current_level().style != style {
            return Err(SprigError::lex(
                position,
                "Inconsistent use of tabs and spaces in indentation.",
            ));
        }

        Ok(())
    }

    /// Close the last logical line and every open block, then emit `EOF`.
    fn finish(&mut self) {
        if self.line_has_tokens {
            self.queue_layout(TokenType::NEWLINE);
            self.line_has_tokens = false;
        }

        while self.levels.len() > 1 {
            self.levels.pop();
            self.queue_layout(TokenType::DEDENT);
        }

        self.queue_layout(TokenType::EOF);
        self.done = true;
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.start`. Returns `Ok(None)` for
    /// whitespace, comments and insignificant newlines.
    fn scan_token(&mut self) -> Result<Option<TokenType>> {
        let b = self.advance();

        let tt: TokenType = match b {
            // ── grouping (tracks implicit line joining) ─────────────────
            b'(' => {
                self.nesting += 1;
                TokenType::LEFT_PAREN
            }
            b')' => {
                self.nesting = self.nesting.saturating_sub(1);
                TokenType::RIGHT_PAREN
            }
            b'[' => {
                self.nesting += 1;
                TokenType::LEFT_BRACKET
            }
            b']' => {
                self.nesting = self.nesting.saturating_sub(1);
                TokenType::RIGHT_BRACKET
            }

            // ── single‑character punctuators ──────────────────────────────
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b':' => TokenType::COLON,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,

            // ── two‑character operators ─────────────────────────────────
            b'+' => {
                if self.match_byte(b'+') {
                    TokenType::PLUS_PLUS
                } else {
                    TokenType::PLUS
                }
            }

            b'-' => {
                if self.match_byte(b'-') {
                    TokenType::MINUS_MINUS
                } else {
                    TokenType::MINUS
                }
            }

            b'!' => {
                if self.match_byte(b'=') {
                    TokenType::BANG_EQUAL
                } else {
                    TokenType::BANG
                }
            }

            b'=' => {
                if self.match_byte(b'=') {
                    TokenType::EQUAL_EQUAL
                } else {
                    TokenType::EQUAL
                }
            }

            b'<' => {
                if self.match_byte(b'=') {
                    TokenType::LESS_EQUAL
                } else {
                    TokenType::LESS
                }
            }

            b'>' => {
                if self.match_byte(b'=') {
                    TokenType::GREATER_EQUAL
                } else {
                    TokenType::GREATER
                }
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    self.skip_comment();
                    return Ok(None);
                }

                TokenType::SLASH
            }

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => return Ok(None),

            b'\n' => {
                let ends_line: bool = self.nesting == 0 && self.line_has_tokens;
                self.newline();

                if self.nesting == 0 {
                    self.at_line_start = true;
                    self.line_has_tokens = false;
                }

                return Ok(ends_line.then_some(TokenType::NEWLINE));
            }

            b'"' => self.parse_string()?,

            b'0'..=b'9' => self.parse_number()?,

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.parse_identifier(),

            // ── unexpected character ─────────────────────────────────────
            _ => {
                let c: char = self.src[self.start..].chars().next().unwrap_or('?');
                self.curr = self.start + c.len_utf8();

                return Err(SprigError::lex(
                    Position::new(self.line, self.column_of(self.start)),
                    format!("Unexpected character: {}", c),
                ));
            }
        };

        Ok(Some(tt))
    }

    /// Parse a double‑quoted string literal. `self.start` points at the
    /// opening `"`; on return `self.curr` is past the closing one.
    fn parse_string(&mut self) -> Result<TokenType> {
        let opened = Position::new(self.line, self.column_of(self.start));

        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.newline();
            }
        }

        if self.is_at_end() {
            return Err(SprigError::lex(opened, "Unterminated string."));
        }

        self.advance(); // closing quote

        let s: &str = &self.src[self.start + 1..self.curr - 1];

        Ok(TokenType::STRING(s.to_owned()))
    }

    /// Parse a numeric literal (`123`, `3.14`). Fractions are optional.
    fn parse_number(&mut self) -> Result<TokenType> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let text: &str = &self.src[self.start..self.curr];

        text.parse::<f64>().map(TokenType::NUMBER).map_err(|e| {
            SprigError::lex(
                Position::new(self.line, self.column_of(self.start)),
                format!("Invalid number '{}': {}", text, e),
            )
        })
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) -> TokenType {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.bytes()[self.start..self.curr];

        KEYWORDS
            .get(slice)
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.queued.pop_front() {
                return Some(Ok(token));
            }

            if self.done {
                return None;
            }

            if self.at_line_start && self.nesting == 0 {
                if let Err(e) = self.measure_indentation() {
                    return Some(self.fail(e));
                }
                continue;
            }

            if self.is_at_end() {
                self.finish();
                continue;
            }

            self.start = self.curr;
            let line: usize = self.line;
            let column: usize = self.column_of(self.start);

            match self.scan_token() {
                Err(e) => return Some(self.fail(e)),

                Ok(None) => {} // whitespace / comment

                Ok(Some(tt)) => {
                    let src: &'a str = self.src;
                    let lexeme: &'a str = if tt == TokenType::NEWLINE {
                        ""
                    } else {
                        self.line_has_tokens = true;
                        &src[self.start..self.curr]
                    };

                    return Some(Ok(Token::new(tt, lexeme, line, column)));
                }
            }
        }
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
