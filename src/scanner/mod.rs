pub mod lexer;
pub mod options;
pub mod stream;
pub mod token;

use tracing::debug;

use crate::error::ScanError;
use lexer::{Scanner, Sink};
use options::{ConcurrencyMode, ScanOptions};
use token::Token;

/// The two result sequences of one scan, each in emission order.
#[derive(Debug, Default)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub errors: Vec<ScanError>,
}

impl ScanOutput {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<ScanError>) {
        (self.tokens, self.errors)
    }

    /// Collapse into a result for callers that treat any scan error as fatal.
    pub fn into_result(self) -> Result<Vec<Token>, Vec<ScanError>> {
        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }
}

impl Sink for ScanOutput {
    fn token(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn error(&mut self, error: ScanError) {
        self.errors.push(error);
    }
}

/// Scan source code into tokens and scan errors.
pub fn scan(source: &str) -> ScanOutput {
    scan_with(source, &ScanOptions::default())
}

/// Scan with explicit options. Errors carry the source for rendering.
pub fn scan_with(source: &str, options: &ScanOptions) -> ScanOutput {
    let mut output = match options.concurrency {
        ConcurrencyMode::Sequential => {
            let mut output = ScanOutput::default();
            Scanner::new(source).run(&mut output);
            output
        }
        ConcurrencyMode::Threaded => stream::spawn(source).into_output(),
    };
    debug!(
        mode = ?options.concurrency,
        tokens = output.tokens.len(),
        errors = output.errors.len(),
        "scan complete"
    );

    if !output.errors.is_empty() {
        output.errors = output
            .errors
            .into_iter()
            .map(|e| e.with_source_code(options.source_name.as_str(), source))
            .collect();
    }
    output
}
