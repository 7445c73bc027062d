use tracing::debug;

use crate::{
    lexer::{Command, TokenStream},
    optimizer::{comment_block, fold_run, specialize_loop, Optimizations},
};

use super::{Block, Instruction, Program};

/// Lowers a validated token stream into IR, applying the requested peephole
/// optimizations on the way.
pub struct IrBuilder<'a> {
    stream: &'a TokenStream,
    optimizations: Optimizations,
}

impl<'a> IrBuilder<'a> {
    pub fn new(stream: &'a TokenStream, optimizations: Optimizations) -> IrBuilder<'a> {
        IrBuilder {
            stream,
            optimizations,
        }
    }

    pub fn build_program(&self) -> Program {
        let mut program = self.build_block(0, self.stream.len());

        if self.optimizations.contains(Optimizations::COMMENT_BLOCK) {
            comment_block(&mut program);
        }

        debug!(
            tokens = self.stream.len(),
            instructions = program.instruction_count(),
            optimizations = ?self.optimizations,
            "built IR"
        );
        program
    }

    /// Builds the tokens in `start..end`, the range never splits a loop
    ///
    /// Recurses once per nested loop, so a few thousand levels of nesting can
    /// run out of stack on a small thread.
    fn build_block(&self, start: usize, end: usize) -> Block {
        let tokens = self.stream.tokens();
        let folding = self.optimizations.contains(Optimizations::RUN_FOLDING);
        let mut instructions = vec![];
        let mut pc = start;

        while pc < end {
            let token = &tokens[pc];
            match token.command {
                Command::Increment | Command::Decrement if folding => {
                    let (next, delta) =
                        fold_run(tokens, pc, end, Command::Increment, Command::Decrement);
                    if delta != 0 {
                        // only the value mod 256 matters, truncating keeps it
                        instructions.push(Instruction::AddValue(delta as i32));
                    }
                    pc = next;
                    continue;
                }
                Command::MoveRight | Command::MoveLeft if folding => {
                    let (next, delta) =
                        fold_run(tokens, pc, end, Command::MoveRight, Command::MoveLeft);
                    if delta != 0 {
                        instructions.push(Instruction::AddPointer(delta));
                    }
                    pc = next;
                    continue;
                }
                Command::Increment => instructions.push(Instruction::AddValue(1)),
                Command::Decrement => instructions.push(Instruction::AddValue(-1)),
                Command::MoveRight => instructions.push(Instruction::AddPointer(1)),
                Command::MoveLeft => instructions.push(Instruction::AddPointer(-1)),
                Command::Output => instructions.push(Instruction::Output),
                Command::Input => instructions.push(Instruction::Input),
                Command::LoopBegin => {
                    // the lexer has matched every `[`
                    let close = token.partner.unwrap_or(end);
                    let body = self.build_block(pc + 1, close);
                    instructions.push(specialize_loop(body, self.optimizations));
                    // skip past the `]`
                    pc = close + 1;
                    continue;
                }
                // only reachable for a `]` outside of any loop, which the lexer rejects
                Command::LoopEnd => {}
            }

            pc += 1;
        }

        Block { instructions }
    }
}
