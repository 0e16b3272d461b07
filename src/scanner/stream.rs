//! Run the scanner as an independent producer.
//!
//! The engine runs on its own thread and hands every token and error over a
//! zero-capacity channel, so each send blocks until the consumer takes it.
//! A third channel carries the completion signal. With a single producer
//! this keeps events in exactly the order they were produced.

use std::panic;
use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use crossbeam::select;
use tracing::debug;

use crate::error::ScanError;
use crate::scanner::ScanOutput;
use crate::scanner::lexer::{Scanner, Sink};
use crate::scanner::token::Token;

#[derive(Debug)]
pub enum ScanEvent {
    Token(Token),
    Error(ScanError),
}

struct ChannelSink {
    tokens: Sender<Token>,
    errors: Sender<ScanError>,
}

// A send only fails once the consumer is gone; the scan still runs to the end.
impl Sink for ChannelSink {
    fn token(&mut self, token: Token) {
        let _ = self.tokens.send(token);
    }

    fn error(&mut self, error: ScanError) {
        let _ = self.errors.send(error);
    }
}

/// Consumer side of a running scan.
pub struct ScanStream {
    tokens: Receiver<Token>,
    errors: Receiver<ScanError>,
    done: Receiver<()>,
    worker: Option<JoinHandle<()>>,
}

/// Start scanning `source` on a worker thread.
pub fn spawn(source: &str) -> ScanStream {
    let (token_tx, token_rx) = channel::bounded(0);
    let (error_tx, error_rx) = channel::bounded(0);
    let (done_tx, done_rx) = channel::bounded(0);

    let scanner = Scanner::new(source);
    let worker = thread::spawn(move || {
        let mut sink = ChannelSink {
            tokens: token_tx,
            errors: error_tx,
        };
        scanner.run(&mut sink);
        let _ = done_tx.send(());
    });

    ScanStream {
        tokens: token_rx,
        errors: error_rx,
        done: done_rx,
        worker: Some(worker),
    }
}

impl ScanStream {
    /// Block until the next token, error, or completion.
    fn next_event(&mut self) -> Option<ScanEvent> {
        self.worker.as_ref()?;
        // A disconnected channel means the worker is gone, same as `done`.
        let event = select! {
            recv(self.tokens) -> msg => msg.ok().map(ScanEvent::Token),
            recv(self.errors) -> msg => msg.ok().map(ScanEvent::Error),
            recv(self.done) -> _ => None,
        };
        match event {
            Some(event) => Some(event),
            None => self.complete(),
        }
    }

    /// Join the worker, re-raising its panic on this thread if it had one.
    fn complete(&mut self) -> Option<ScanEvent> {
        if let Some(worker) = self.worker.take() {
            if let Err(payload) = worker.join() {
                panic::resume_unwind(payload);
            }
            debug!("scan worker finished");
        }
        None
    }

    /// Drain every remaining event into the two result sequences.
    pub fn into_output(self) -> ScanOutput {
        let mut output = ScanOutput::default();
        for event in self {
            match event {
                ScanEvent::Token(token) => output.tokens.push(token),
                ScanEvent::Error(error) => output.errors.push(error),
            }
        }
        output
    }
}

impl Iterator for ScanStream {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<ScanEvent> {
        self.next_event()
    }
}
