//! Loop resolution: pairs every `[` with its `]` before anything runs.

use crate::program::{Op, Program};
use crate::{SyntaxError, UnmatchedBracketKind};

/// Matching bracket positions, in both directions.
///
/// `target(i)` holds the matching index for a `[` or `]` at index `i` and is
/// `None` for every other position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpMap {
    targets: Vec<Option<usize>>,
}

impl JumpMap {
    pub fn target(&self, pos: usize) -> Option<usize> {
        self.targets.get(pos).copied().flatten()
    }

    /// Number of matched `[`/`]` pairs.
    pub fn pairs(&self) -> usize {
        self.iter().count() / 2
    }

    /// All `(from, to)` entries in position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter_map(|(from, to)| to.map(|to| (from, to)))
    }
}

/// Build the jump map for `program`, or report the first unmatched bracket.
///
/// An extra `]` is reported at its own position as soon as it is seen. Any `[`
/// still open at the end is reported at the earliest such position.
pub fn resolve(program: &Program) -> Result<JumpMap, SyntaxError> {
    let ops = program.ops();
    let mut targets: Vec<Option<usize>> = vec![None; ops.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (i, &op) in ops.iter().enumerate() {
        match op {
            Op::LoopOpen => stack.push(i),
            Op::LoopClose => {
                let Some(open_index) = stack.pop() else {
                    return Err(SyntaxError { ip: i, kind: UnmatchedBracketKind::Close });
                };
                targets[open_index] = Some(i);
                targets[i] = Some(open_index);
            }
            _ => {}
        }
    }

    if let Some(&unmatched_open) = stack.first() {
        return Err(SyntaxError { ip: unmatched_open, kind: UnmatchedBracketKind::Open });
    }

    let jumps = JumpMap { targets };
    log::debug!("resolved {} loop pair(s) over {} instruction(s)", jumps.pairs(), ops.len());
    Ok(jumps)
}
