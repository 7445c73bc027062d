//! Error types for the whole pipeline.

use thiserror::Error;

use crate::{interpreter::RuntimeError, lexer::LexerError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Lexer error: {0}")]
    Lexer(#[from] LexerError),

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}
