use std::io::{Read, Write};

use crate::lexer::{Command, TokenStream};

use super::{Runtime, RuntimeError};

/// Runs the token stream one command at a time, no optimizations at all.
///
/// This is the behaviour everything the optimizer produces is measured
/// against.
#[derive(Debug, Default)]
pub struct TokenInterpreter {}

impl TokenInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn run<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        stream: &TokenStream,
    ) -> Result<(), RuntimeError> {
        let tokens = stream.tokens();
        let mut pc = 0;
        while pc < tokens.len() {
            let token = &tokens[pc];
            match token.command {
                Command::MoveRight => runtime.shift_data_pointer(1)?,
                Command::MoveLeft => runtime.shift_data_pointer(-1)?,
                Command::Increment => runtime.add_value(1),
                Command::Decrement => runtime.add_value(-1),
                Command::Output => runtime.write()?,
                Command::Input => runtime.read()?,
                Command::LoopBegin => {
                    if runtime.value_is_zero() {
                        if let Some(end) = token.partner {
                            // land on the `]`, the increment below steps past it
                            pc = end;
                        }
                    }
                }
                Command::LoopEnd => {
                    if !runtime.value_is_zero() {
                        if let Some(begin) = token.partner {
                            pc = begin;
                        }
                    }
                }
            }
            pc += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::lexer::lexer::Lexer;

    fn run(source: &str, input: &[u8]) -> (Result<(), RuntimeError>, Vec<u8>, Vec<u8>) {
        let stream = Lexer::new(source).tokenize().unwrap();
        let mut runtime = Runtime::new(RuntimeConfig::with_tape_size(8), input, vec![]);
        let result = TokenInterpreter::new().run(&mut runtime, &stream);
        let tape = runtime.tape().to_vec();
        (result, tape, runtime.into_output())
    }

    #[test]
    fn copies_input_to_output() {
        let (result, _, output) = run(",[.,]", b"cat");
        result.unwrap();
        assert_eq!(output, b"cat".to_vec());
    }

    #[test]
    fn nested_loops() {
        let (result, tape, _) = run("++[>+++[>+<-]<-]", b"");
        result.unwrap();
        assert_eq!(&tape[..3], &[0, 0, 6]);
    }

    #[test]
    fn skips_loops_on_zero() {
        let (result, tape, _) = run("[<<<]+", b"");
        result.unwrap();
        assert_eq!(tape[0], 1);
    }

    #[test]
    fn fails_on_the_exact_command() {
        let (result, _, output) = run("+.<.", b"");
        assert!(matches!(
            result,
            Err(RuntimeError::PointerOutOfBounds { pointer: -1, .. })
        ));
        assert_eq!(output, vec![1]);
    }
}
