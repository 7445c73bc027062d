use crate::ir::{Instruction, Program};

/// If the program starts with loops we can skip them.
///
/// The first cell is always 0 when the program starts, so any `[` there
/// jumps straight past its `]`. People use this for a leading comment block.
pub fn comment_block(program: &mut Program) {
    let leading = program
        .instructions
        .iter()
        .take_while(|instruction| {
            matches!(
                instruction,
                Instruction::Loop(_) | Instruction::SetValue(0) | Instruction::Transfer(_)
            )
        })
        .count();

    program.instructions.drain(..leading);
}
