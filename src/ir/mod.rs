use std::fmt;

pub mod builder;

/// One `(offset, multiplier)` target of a [`Instruction::Transfer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferEntry {
    pub offset: isize,
    pub multiplier: i32,
}

impl TransferEntry {
    pub fn new(offset: isize, multiplier: i32) -> Self {
        Self { offset, multiplier }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Move the data pointer by the given amount
    AddPointer(isize),
    /// Add to the cell at the data pointer, wrapping at 256
    AddValue(i32),
    /// Overwrite the cell at the data pointer, this is what a clear loop becomes
    SetValue(u8),
    /// Add `multiplier * cell` to each cell at `pointer + offset` (in order),
    /// then zero the current cell
    Transfer(Vec<TransferEntry>),
    /// Run the body while the current cell is non-zero
    Loop(Block),
    Output,
    Input,
}

/// A run of instructions. Loops own their body as a nested `Block`, so
/// building, running and dropping a block all recurse as deep as the loops
/// nest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub instructions: Vec<Instruction>,
}

pub type Program = Block;

impl Block {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions including everything nested inside loops
    pub fn instruction_count(&self) -> usize {
        self.instructions
            .iter()
            .map(|instruction| match instruction {
                Instruction::Loop(body) => 1 + body.instruction_count(),
                _ => 1,
            })
            .sum()
    }

    fn fmt_with_indent(&self, indent: usize, f: &mut fmt::Formatter) -> fmt::Result {
        for instruction in self.instructions.iter() {
            write!(f, "{}", "  ".repeat(indent))?;
            match instruction {
                Instruction::Loop(body) => {
                    writeln!(f, "Loop")?;
                    body.fmt_with_indent(indent + 1, f)?;
                }
                Instruction::Transfer(entries) => {
                    write!(f, "Transfer")?;
                    for entry in entries {
                        write!(f, " [{:+}]*{}", entry.offset, entry.multiplier)?;
                    }
                    writeln!(f)?;
                }
                other => writeln!(f, "{:?}", other)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with_indent(0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_indents_loops() {
        let program = Block::new(vec![
            Instruction::AddValue(3),
            Instruction::Loop(Block::new(vec![
                Instruction::Output,
                Instruction::AddValue(-1),
            ])),
            Instruction::Transfer(vec![TransferEntry::new(-2, 1), TransferEntry::new(1, 3)]),
        ]);

        assert_eq!(
            program.to_string(),
            "AddValue(3)\nLoop\n  Output\n  AddValue(-1)\nTransfer [-2]*1 [+1]*3\n"
        );
    }

    #[test]
    fn instruction_count_includes_loop_bodies() {
        let program = Block::new(vec![
            Instruction::Input,
            Instruction::Loop(Block::new(vec![
                Instruction::Loop(Block::new(vec![Instruction::AddPointer(1)])),
                Instruction::SetValue(0),
            ])),
        ]);
        assert_eq!(program.instruction_count(), 5);
    }
}
