//! Configuration for a single run of a program.

use clap::ValueEnum;

/// Number of cells on the tape unless told otherwise
pub const DEFAULT_TAPE_SIZE: usize = 30_000;

/// What `,` stores in the current cell once the input is exhausted
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EofPolicy {
    /// Set the cell to 0
    #[default]
    Zero,
    /// Leave the cell as it is
    Unchanged,
    /// Set the cell to 255
    Max,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Number of cells, the data pointer must stay within `0..tape_size`
    pub tape_size: usize,
    pub eof: EofPolicy,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tape_size: DEFAULT_TAPE_SIZE,
            eof: EofPolicy::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn with_tape_size(tape_size: usize) -> Self {
        Self {
            tape_size,
            ..Self::default()
        }
    }
}
