use std::num::{ParseFloatError, ParseIntError};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Span;

// ============= Scan errors (with miette diagnostics) =============

/// A non-fatal problem found while scanning. The scan always continues past it.
#[derive(Error, Debug, Diagnostic)]
pub enum ScanError {
    #[error("line {line}: unknown character '{ch}'")]
    #[diagnostic(code(ember::scan::unknown_character))]
    UnknownCharacter {
        ch: char,
        line: usize,
        #[label("not part of any token")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("line {line}: unrecognized token: found single char {ch}")]
    #[diagnostic(
        code(ember::scan::lone_operator),
        help("logical operators are written `&&` and `||`")
    )]
    LoneOperator {
        ch: char,
        line: usize,
        #[label("must be doubled")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("line {line}: too many '.'s found in float, lex: {lexeme}")]
    #[diagnostic(code(ember::scan::too_many_dots))]
    TooManyDots {
        lexeme: String,
        line: usize,
        #[label("second '.' here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("line {line}: invalid integer literal '{lexeme}'")]
    #[diagnostic(code(ember::scan::invalid_int))]
    InvalidInt {
        lexeme: String,
        line: usize,
        source: ParseIntError,
        #[label("does not fit the literal type")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("line {line}: invalid float literal '{lexeme}'")]
    #[diagnostic(code(ember::scan::invalid_float))]
    InvalidFloat {
        lexeme: String,
        line: usize,
        source: ParseFloatError,
        #[label("does not fit the literal type")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("line {line}: closing \" of string not found")]
    #[diagnostic(code(ember::scan::unterminated_string))]
    UnterminatedString {
        line: usize,
        #[label("string starts here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },
}

fn no_source() -> NamedSource<String> {
    NamedSource::new("input", String::new())
}

impl ScanError {
    pub fn unknown_character(ch: char, line: usize, span: Span) -> Self {
        Self::UnknownCharacter {
            ch,
            line,
            span: span.into(),
            src: no_source(),
        }
    }

    pub fn lone_operator(ch: char, line: usize, span: Span) -> Self {
        Self::LoneOperator {
            ch,
            line,
            span: span.into(),
            src: no_source(),
        }
    }

    pub fn too_many_dots(lexeme: impl Into<String>, line: usize, span: Span) -> Self {
        Self::TooManyDots {
            lexeme: lexeme.into(),
            line,
            span: span.into(),
            src: no_source(),
        }
    }

    pub fn invalid_int(
        lexeme: impl Into<String>,
        source: ParseIntError,
        line: usize,
        span: Span,
    ) -> Self {
        Self::InvalidInt {
            lexeme: lexeme.into(),
            line,
            source,
            span: span.into(),
            src: no_source(),
        }
    }

    pub fn invalid_float(
        lexeme: impl Into<String>,
        source: ParseFloatError,
        line: usize,
        span: Span,
    ) -> Self {
        Self::InvalidFloat {
            lexeme: lexeme.into(),
            line,
            source,
            span: span.into(),
            src: no_source(),
        }
    }

    pub fn unterminated_string(line: usize, span: Span) -> Self {
        Self::UnterminatedString {
            line,
            span: span.into(),
            src: no_source(),
        }
    }

    /// 0-based line the error was reported on.
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownCharacter { line, .. }
            | Self::LoneOperator { line, .. }
            | Self::TooManyDots { line, .. }
            | Self::InvalidInt { line, .. }
            | Self::InvalidFloat { line, .. }
            | Self::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn span(&self) -> Span {
        let span = match self {
            Self::UnknownCharacter { span, .. }
            | Self::LoneOperator { span, .. }
            | Self::TooManyDots { span, .. }
            | Self::InvalidInt { span, .. }
            | Self::InvalidFloat { span, .. }
            | Self::UnterminatedString { span, .. } => span,
        };
        Span::new(span.offset(), span.len())
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        let named = NamedSource::new(name.into(), source.into());
        match &mut self {
            Self::UnknownCharacter { src, .. }
            | Self::LoneOperator { src, .. }
            | Self::TooManyDots { src, .. }
            | Self::InvalidInt { src, .. }
            | Self::InvalidFloat { src, .. }
            | Self::UnterminatedString { src, .. } => *src = named,
        }
        self
    }
}

// ============= Tests =============
