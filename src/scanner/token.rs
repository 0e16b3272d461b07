use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::EnumIter)]
pub enum TokenKind {
    // Literals
    String,
    Int,
    Float,
    Identifier,

    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftSquare,
    RightSquare,
    Comma,
    Dot,
    Minus,
    Plus,
    Colon,
    Slash,
    Star,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    AmperAmper,
    PipePipe,

    // Keywords
    Fun,
    For,
    If,
    Else,
    Null,
    True,
    False,
    Print,
    Return,
    Var,
    Val,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "STRING"),
            Self::Int => write!(f, "INT"),
            Self::Float => write!(f, "FLOAT"),
            Self::Identifier => write!(f, "IDENTIFIER"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
            Self::LeftSquare => write!(f, "["),
            Self::RightSquare => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Minus => write!(f, "-"),
            Self::Plus => write!(f, "+"),
            Self::Colon => write!(f, ":"),
            Self::Slash => write!(f, "/"),
            Self::Star => write!(f, "*"),
            Self::Bang => write!(f, "!"),
            Self::BangEqual => write!(f, "!="),
            Self::Equal => write!(f, "="),
            Self::EqualEqual => write!(f, "=="),
            Self::Greater => write!(f, ">"),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::LessEqual => write!(f, "<="),
            Self::AmperAmper => write!(f, "&&"),
            Self::PipePipe => write!(f, "||"),
            Self::Fun => write!(f, "fun"),
            Self::For => write!(f, "for"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::Null => write!(f, "null"),
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
            Self::Print => write!(f, "print"),
            Self::Return => write!(f, "return"),
            Self::Var => write!(f, "var"),
            Self::Val => write!(f, "val"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}

impl TokenKind {
    /// Single-character punctuation, keyed by the character that produces it.
    pub fn punctuation(c: char) -> Option<Self> {
        let kind = match c {
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '[' => Self::LeftSquare,
            ']' => Self::RightSquare,
            '{' => Self::LeftBrace,
            '}' => Self::RightBrace,
            ',' => Self::Comma,
            '.' => Self::Dot,
            '-' => Self::Minus,
            '+' => Self::Plus,
            '*' => Self::Star,
            ':' => Self::Colon,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::Fun
                | Self::For
                | Self::If
                | Self::Else
                | Self::Null
                | Self::True
                | Self::False
                | Self::Print
                | Self::Return
                | Self::Var
                | Self::Val
        )
    }
}

/// Decoded value carried by literal-bearing tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// Byte range into the UTF-8 source a token or error was scanned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    /// 0-based line the token starts on.
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: None,
            line,
            span,
        }
    }

    pub fn with_literal(mut self, literal: Literal) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn eof(line: usize, offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", line, Span::new(offset, 0))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(lit) => write!(f, "{:?} '{}' {} @{}", self.kind, self.lexeme, lit, self.line),
            None => write!(f, "{:?} '{}' @{}", self.kind, self.lexeme, self.line),
        }
    }
}

/// Keyword table. Matching is exact and case-sensitive.
pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    match ident {
        "fun" => Some(TokenKind::Fun),
        "for" => Some(TokenKind::For),
        "if" => Some(TokenKind::If),
        "else" => Some(TokenKind::Else),
        "null" => Some(TokenKind::Null),
        "True" => Some(TokenKind::True),
        "False" => Some(TokenKind::False),
        "print" => Some(TokenKind::Print),
        "return" => Some(TokenKind::Return),
        "var" => Some(TokenKind::Var),
        "val" => Some(TokenKind::Val),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn keywords_round_trip_through_display() {
        let keywords: Vec<TokenKind> = TokenKind::iter().filter(|k| k.is_keyword()).collect();
        assert_eq!(keywords.len(), 11);
        for kind in keywords {
            assert_eq!(keyword_kind(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(keyword_kind("True"), Some(TokenKind::True));
        assert_eq!(keyword_kind("true"), None);
        assert_eq!(keyword_kind("FOR"), None);
    }

    #[test]
    fn punctuation_display_matches_source_char() {
        for c in "()[]{},.-+*:".chars() {
            let kind = TokenKind::punctuation(c).expect("punctuation char");
            assert_eq!(kind.to_string(), c.to_string());
        }
        assert_eq!(TokenKind::punctuation('/'), None);
    }

    #[test]
    fn literal_kinds_are_not_keywords() {
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::Eof.is_keyword());
        assert_eq!(TokenKind::Eof.to_string(), "EOF");
    }

    #[test]
    fn token_display() {
        let tok = Token::new(TokenKind::Int, "42", 3, Span::new(0, 2)).with_literal(Literal::Int(42));
        assert_eq!(tok.to_string(), "Int '42' 42 @3");
        assert_eq!(Token::eof(0, 0).to_string(), "Eof '' @0");
    }
}
