use crate::lexer::{Command, Token};

/// Accumulates a run of `positive`/`negative` commands starting at `start`
/// (and stopping at `end`) into a single signed amount.
///
/// Returns the index of the first token after the run alongside the net
/// amount, i.e. `+++--` is `1` and `>><<<<` is `-2`.
pub fn fold_run(
    tokens: &[Token],
    start: usize,
    end: usize,
    positive: Command,
    negative: Command,
) -> (usize, isize) {
    let mut pc = start;
    // accumulate all the values into this "constant"
    let mut acc: isize = 0;

    while pc < end {
        let command = tokens[pc].command;
        if command == positive {
            acc += 1;
        } else if command == negative {
            acc -= 1;
        } else {
            // no longer a series of constants
            break;
        }
        pc += 1;
    }

    (pc, acc)
}
