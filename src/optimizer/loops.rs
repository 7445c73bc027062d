use tracing::trace;

use crate::ir::{Block, Instruction, TransferEntry};

use super::Optimizations;

/// Picks the cheapest instruction equivalent to running `body` in a loop.
///
/// The body has already been built (and folded), so `[->>+<<]` and
/// `[>>+<<-]` look the same here.
pub fn specialize_loop(body: Block, optimizations: Optimizations) -> Instruction {
    if optimizations.contains(Optimizations::CLEAR_LOOPS) && is_clear_loop(&body) {
        trace!("clear loop");
        return Instruction::SetValue(0);
    }

    if optimizations.contains(Optimizations::TRANSFER_LOOPS) {
        if let Some(entries) = transfer_entries(&body) {
            trace!(targets = entries.len(), "transfer loop");
            return Instruction::Transfer(entries);
        }
    }

    Instruction::Loop(body)
}

/// `[-]`, `[+]`, `[---]`...
///
/// An odd step is coprime with 256 so it hits zero from any starting value,
/// an even one (`[--]`) spins forever on odd cells and has to stay a loop.
fn is_clear_loop(body: &Block) -> bool {
    matches!(body.instructions.as_slice(), [Instruction::AddValue(delta)] if delta % 2 != 0)
}

/// `[->+>+<<]` and friends: the counter is decremented exactly once, every
/// other change lands on some other cell and the pointer ends where it
/// started.
///
/// The outermost cells the body visits must be written to, otherwise an
/// unfolded `[->>><<+<]` would read past the tape where the transfer doesn't.
/// With run folding the body only ever sees where each run ends, so that
/// loop folds to `[->+<]` and becomes a transfer.
fn transfer_entries(body: &Block) -> Option<Vec<TransferEntry>> {
    let mut displacement: isize = 0;
    let mut lowest: isize = 0;
    let mut highest: isize = 0;
    let mut counter_decrements = 0;
    let mut entries = vec![];

    for instruction in body.instructions.iter() {
        match *instruction {
            Instruction::AddPointer(delta) => {
                displacement += delta;
                lowest = lowest.min(displacement);
                highest = highest.max(displacement);
            }
            Instruction::AddValue(-1) if displacement == 0 => counter_decrements += 1,
            Instruction::AddValue(delta) if displacement != 0 => {
                entries.push(TransferEntry::new(displacement, delta))
            }
            // I/O, nested loops or anything else touching the counter
            _ => return None,
        }
    }

    if displacement != 0 || counter_decrements != 1 {
        return None;
    }

    let written = |offset: isize| offset == 0 || entries.iter().any(|e| e.offset == offset);
    if !written(lowest) || !written(highest) {
        return None;
    }

    Some(entries)
}
