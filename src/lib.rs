//! dementia translates programs for the eight-command tape machine into a
//! small tree IR, folding common idioms on the way, and interprets it.
//!
//! ```
//! use dementia::{compile, execute, Optimizations, RuntimeConfig};
//!
//! let program = compile("++++++++[>+++++++++<-]>.", Optimizations::default()).unwrap();
//! let mut output = vec![];
//! execute(&program, RuntimeConfig::default(), std::io::empty(), &mut output).unwrap();
//! assert_eq!(output, b"H");
//! ```

pub mod config;
pub mod error;
pub mod interpreter;
pub mod ir;
pub mod lexer;
pub mod optimizer;


use std::io::{Read, Write};

use tracing::debug;

pub use crate::config::{EofPolicy, RuntimeConfig, DEFAULT_TAPE_SIZE};
pub use crate::error::{Error, Result};
pub use crate::interpreter::{
    ir_interpreter::IrInterpreter, token_interpreter::TokenInterpreter, Runtime, RuntimeError,
};
pub use crate::ir::{builder::IrBuilder, Block, Instruction, Program, TransferEntry};
pub use crate::lexer::{lexer::Lexer, Command, LexerError, Position, Token, TokenStream};
pub use crate::optimizer::Optimizations;

/// Validates `source` and lowers it to IR
pub fn compile(source: &str, optimizations: Optimizations) -> Result<Program> {
    let stream = Lexer::new(source).tokenize()?;
    Ok(IrBuilder::new(&stream, optimizations).build_program())
}

/// Runs `program` on a fresh tape, returning the tape once it finishes.
///
/// On failure whatever was written to `output` so far stays written.
pub fn execute<R: Read, W: Write>(
    program: &Program,
    config: RuntimeConfig,
    input: R,
    output: W,
) -> Result<Vec<u8>> {
    let mut runtime = Runtime::new(config, input, output);
    let result = IrInterpreter::new().interpret(&mut runtime, program);
    // flush even when the run failed, partial output is still output
    runtime.flush()?;
    result?;

    debug!(data_pointer = runtime.data_pointer(), "program finished");
    Ok(runtime.tape().to_vec())
}
