use std::io::{Read, Write};

use crate::ir::{Block, Instruction};

use super::{Runtime, RuntimeError};

/// Walks the IR tree, loops recurse into their body
#[derive(Debug, Default)]
pub struct IrInterpreter {}

impl IrInterpreter {
    pub fn new() -> Self {
        Self {}
    }

    /// Runs `block` to completion or to the first failing instruction.
    ///
    /// Nested loops recurse, the stack grows with loop nesting depth.
    pub fn interpret<R: Read, W: Write>(
        &mut self,
        runtime: &mut Runtime<R, W>,
        block: &Block,
    ) -> Result<(), RuntimeError> {
        for instruction in block.instructions.iter() {
            match instruction {
                Instruction::AddPointer(by) => runtime.shift_data_pointer(*by)?,
                Instruction::AddValue(by) => runtime.add_value(*by),
                Instruction::SetValue(value) => runtime.set_value(*value),
                Instruction::Transfer(entries) => runtime.transfer(entries)?,
                Instruction::Loop(body) => {
                    while !runtime.value_is_zero() {
                        self.interpret(runtime, body)?;
                    }
                }
                Instruction::Output => runtime.write()?,
                Instruction::Input => runtime.read()?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::ir::TransferEntry;
    use std::io::empty;
    use Instruction::*;

    fn run(
        instructions: Vec<Instruction>,
        tape_size: usize,
    ) -> (Result<(), RuntimeError>, Runtime<std::io::Empty, Vec<u8>>) {
        let mut runtime = Runtime::new(RuntimeConfig::with_tape_size(tape_size), empty(), vec![]);
        let result = IrInterpreter::new().interpret(&mut runtime, &Block::new(instructions));
        (result, runtime)
    }

    #[test]
    fn add_value_wraps() {
        let (result, runtime) = run(vec![AddValue(-1)], 1);
        result.unwrap();
        assert_eq!(runtime.tape(), &[255]);

        let (result, runtime) = run(vec![AddValue(-1), AddValue(1)], 1);
        result.unwrap();
        assert_eq!(runtime.tape(), &[0]);
    }

    #[test]
    fn loop_runs_until_zero() {
        let (result, runtime) = run(
            vec![
                AddValue(3),
                Loop(Block::new(vec![
                    AddPointer(1),
                    AddValue(2),
                    AddPointer(-1),
                    AddValue(-1),
                ])),
            ],
            2,
        );
        result.unwrap();
        assert_eq!(runtime.tape(), &[0, 6]);
    }

    #[test]
    fn loop_on_zero_is_skipped() {
        let (result, runtime) = run(vec![Loop(Block::new(vec![AddPointer(-1)]))], 1);
        result.unwrap();
        assert_eq!(runtime.data_pointer(), 0);
    }

    #[test]
    fn transfer_and_set() {
        let (result, runtime) = run(
            vec![
                AddValue(5),
                Transfer(vec![TransferEntry::new(1, 1), TransferEntry::new(2, 2)]),
                SetValue(9),
            ],
            3,
        );
        result.unwrap();
        assert_eq!(runtime.tape(), &[9, 5, 10]);
    }

    #[test]
    fn output_before_a_failure_is_kept() {
        let (result, runtime) = run(
            vec![AddValue(65), Output, AddPointer(-1), Output],
            4,
        );
        assert!(matches!(
            result,
            Err(RuntimeError::PointerOutOfBounds { pointer: -1, .. })
        ));
        assert_eq!(runtime.into_output(), b"A".to_vec());
    }

    #[test]
    fn moving_past_the_last_cell_fails() {
        let (result, runtime) = run(vec![AddPointer(2), Output, AddPointer(2), Output], 3);
        assert!(matches!(
            result,
            Err(RuntimeError::PointerOutOfBounds {
                pointer: 4,
                tape_len: 3
            })
        ));
        assert_eq!(runtime.into_output(), vec![0]);
    }
}
