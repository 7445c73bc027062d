use bitflags::bitflags;

pub mod comment_block;
pub mod loops;
pub mod run_folding;

pub use self::comment_block::comment_block;
pub use self::loops::specialize_loop;
pub use self::run_folding::fold_run;

bitflags! {
    /// Which peephole rewrites the IR builder applies
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Optimizations: u8 {
        /// Fold runs of `+-` and `<>` into a single instruction
        const RUN_FOLDING    = 0b0001;
        /// `[-]` and friends become `SetValue(0)`
        const CLEAR_LOOPS    = 0b0010;
        /// `[->+<]` and friends become `Transfer`
        const TRANSFER_LOOPS = 0b0100;
        /// Drop loops at the start of the program, the first cell is always 0 there
        const COMMENT_BLOCK  = 0b1000;
    }
}

impl Optimizations {
    /// Everything that is on unless asked otherwise
    pub const PEEPHOLE: Optimizations = Optimizations::RUN_FOLDING
        .union(Optimizations::CLEAR_LOOPS)
        .union(Optimizations::TRANSFER_LOOPS);
}

impl Default for Optimizations {
    fn default() -> Self {
        Optimizations::PEEPHOLE
    }
}
