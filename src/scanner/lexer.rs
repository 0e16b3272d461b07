//! Hand-rolled scanning state machine.
//!
//! The engine walks the source one codepoint at a time with at most one
//! codepoint of lookahead. Every recognized unit is handed to a [`Sink`] as
//! soon as it is complete, so the same engine can fill a pair of vectors or
//! feed a pair of channels.

use tracing::trace;
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::ScanError;
use crate::scanner::token::{Literal, Span, Token, TokenKind, keyword_kind};

/// Decimal digit (general category Nd).
fn is_digit(c: char) -> bool {
    matches!(get_general_category(c), GeneralCategory::DecimalNumber)
}

/// Letter of any case or script (general category L*).
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// Receiver of scan events, in the order the engine produces them.
pub trait Sink {
    fn token(&mut self, token: Token);
    fn error(&mut self, error: ScanError);
}

/// Cursor position recorded at the start of a token.
#[derive(Debug, Clone, Copy)]
struct Mark {
    index: usize,
    offset: usize,
    line: usize,
}

pub struct Scanner {
    source: Vec<char>,
    /// Index of the next codepoint to consume.
    current: usize,
    /// Byte offset of `current` in the UTF-8 source.
    offset: usize,
    line: usize,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            current: 0,
            offset: 0,
            line: 0,
        }
    }

    /// Scan the whole source, then emit the terminal EOF token.
    pub fn run(mut self, sink: &mut impl Sink) {
        while !self.is_at_end() {
            self.scan_token(sink);
        }
        let eof = Token::eof(self.line, self.offset);
        self.push(sink, eof);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += 1;
        self.offset += c.len_utf8();
        Some(c)
    }

    fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn mark(&self) -> Mark {
        Mark {
            index: self.current,
            offset: self.offset,
            line: self.line,
        }
    }

    fn text_since(&self, mark: Mark) -> String {
        self.source[mark.index..self.current].iter().collect()
    }

    fn span_since(&self, mark: Mark) -> Span {
        Span::new(mark.offset, self.offset - mark.offset)
    }

    fn token_since(&self, kind: TokenKind, mark: Mark) -> Token {
        Token::new(kind, self.text_since(mark), mark.line, self.span_since(mark))
    }

    fn push(&self, sink: &mut impl Sink, token: Token) {
        trace!(kind = ?token.kind, lexeme = %token.lexeme, line = token.line, "token");
        sink.token(token);
    }

    fn report(&self, sink: &mut impl Sink, error: ScanError) {
        trace!(line = error.line(), %error, "scan error");
        sink.error(error);
    }

    fn scan_token(&mut self, sink: &mut impl Sink) {
        let mark = self.mark();
        let Some(c) = self.advance() else {
            return;
        };

        if let Some(kind) = TokenKind::punctuation(c) {
            let token = self.token_since(kind, mark);
            self.push(sink, token);
            return;
        }

        match c {
            '\n' => self.line += 1,
            c if c.is_whitespace() => {}
            '/' => match self.peek() {
                Some('/') => self.line_comment(),
                Some('*') => self.block_comment(),
                _ => {
                    let token = self.token_since(TokenKind::Slash, mark);
                    self.push(sink, token);
                }
            },
            '<' => self.one_or_two(sink, mark, TokenKind::LessEqual, TokenKind::Less),
            '>' => self.one_or_two(sink, mark, TokenKind::GreaterEqual, TokenKind::Greater),
            '!' => self.one_or_two(sink, mark, TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.one_or_two(sink, mark, TokenKind::EqualEqual, TokenKind::Equal),
            '&' => self.doubled(sink, mark, c, TokenKind::AmperAmper),
            '|' => self.doubled(sink, mark, c, TokenKind::PipePipe),
            '"' => self.string(sink, mark),
            c if is_digit(c) => self.number(sink, mark),
            c if is_letter(c) => self.identifier(sink, mark),
            other => {
                let error = ScanError::unknown_character(other, mark.line, self.span_since(mark));
                self.report(sink, error);
            }
        }
    }

    /// `<`, `>`, `!` and `=` optionally followed by `=`.
    fn one_or_two(&mut self, sink: &mut impl Sink, mark: Mark, two: TokenKind, one: TokenKind) {
        let kind = if self.advance_if('=') { two } else { one };
        let token = self.token_since(kind, mark);
        self.push(sink, token);
    }

    /// `&&` and `||`; a single `&` or `|` is not a token.
    fn doubled(&mut self, sink: &mut impl Sink, mark: Mark, c: char, kind: TokenKind) {
        if self.advance_if(c) {
            let token = self.token_since(kind, mark);
            self.push(sink, token);
        } else {
            let error = ScanError::lone_operator(c, mark.line, self.span_since(mark));
            self.report(sink, error);
        }
    }

    /// Called with the first `/` consumed and the second one pending. The
    /// comment always ends a line, whether at a newline or at end of input.
    fn line_comment(&mut self) {
        while let Some(c) = self.advance() {
            if c == '\n' {
                break;
            }
        }
        self.line += 1;
    }

    /// Called with `/` consumed and `*` pending. The opening `*` counts
    /// toward the close, so `/*/` is a complete comment. An unclosed block
    /// comment silently runs to the end of input.
    fn block_comment(&mut self) {
        self.advance();
        let mut found_star = true;
        while let Some(c) = self.advance() {
            match c {
                '\n' => {
                    found_star = false;
                    self.line += 1;
                }
                '*' => found_star = true,
                '/' if found_star => return,
                _ => found_star = false,
            }
        }
        trace!(line = self.line, "block comment ran to end of input");
    }

    /// String literals have no escapes. A raw newline inside the quotes is
    /// dropped from both the lexeme and the literal but still counts as a line.
    fn string(&mut self, sink: &mut impl Sink, mark: Mark) {
        let mut lexeme = String::from('"');
        let mut literal = String::new();
        loop {
            match self.advance() {
                None => {
                    let error = ScanError::unterminated_string(mark.line, self.span_since(mark));
                    self.report(sink, error);
                    return;
                }
                Some('"') => {
                    lexeme.push('"');
                    break;
                }
                Some('\n') => self.line += 1,
                Some(c) => {
                    lexeme.push(c);
                    literal.push(c);
                }
            }
        }
        let token = Token::new(TokenKind::String, lexeme, mark.line, self.span_since(mark))
            .with_literal(Literal::String(literal));
        self.push(sink, token);
    }

    fn number(&mut self, sink: &mut impl Sink, mark: Mark) {
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c == '.' {
                let dot = self.mark();
                self.advance();
                if is_float {
                    let error =
                        ScanError::too_many_dots(self.text_since(mark), mark.line, self.span_since(dot));
                    self.report(sink, error);
                    return;
                }
                is_float = true;
            } else if is_digit(c) {
                self.advance();
            } else {
                break;
            }
        }

        let lexeme = self.text_since(mark);
        let span = self.span_since(mark);
        let literal = if is_float {
            lexeme
                .parse::<f64>()
                .map(Literal::Float)
                .map_err(|e| ScanError::invalid_float(&lexeme, e, mark.line, span))
        } else {
            lexeme
                .parse::<i64>()
                .map(Literal::Int)
                .map_err(|e| ScanError::invalid_int(&lexeme, e, mark.line, span))
        };

        match literal {
            Ok(literal) => {
                let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
                let token = Token::new(kind, lexeme, mark.line, span).with_literal(literal);
                self.push(sink, token);
            }
            Err(error) => self.report(sink, error),
        }
    }

    fn identifier(&mut self, sink: &mut impl Sink, mark: Mark) {
        while self
            .peek()
            .is_some_and(|c| is_letter(c) || is_digit(c) || c == '_')
        {
            self.advance();
        }
        let lexeme = self.text_since(mark);
        let span = self.span_since(mark);
        let token = match keyword_kind(&lexeme) {
            Some(kind) => Token::new(kind, lexeme, mark.line, span),
            None => Token::new(TokenKind::Identifier, lexeme.clone(), mark.line, span)
                .with_literal(Literal::String(lexeme)),
        };
        self.push(sink, token);
    }
}
