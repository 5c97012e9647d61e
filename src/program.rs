//! The instruction alphabet and source sanitization.

use crate::EngineError;

/// One of the eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Inc,
    /// `-`
    Dec,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopOpen,
    /// `]`
    LoopClose,
}

impl Op {
    pub fn from_char(c: char) -> Option<Op> {
        Some(match c {
            '>' => Op::Right,
            '<' => Op::Left,
            '+' => Op::Inc,
            '-' => Op::Dec,
            '.' => Op::Output,
            ',' => Op::Input,
            '[' => Op::LoopOpen,
            ']' => Op::LoopClose,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Op::Right => '>',
            Op::Left => '<',
            Op::Inc => '+',
            Op::Dec => '-',
            Op::Output => '.',
            Op::Input => ',',
            Op::LoopOpen => '[',
            Op::LoopClose => ']',
        }
    }
}

/// Keep only Brainfuck instruction characters.
///
/// Positions in the returned string are the positions every later error refers to.
pub fn sanitize(raw: &str) -> String {
    raw.chars().filter(|&c| Op::from_char(c).is_some()).collect()
}

/// A sanitized instruction sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    ops: Vec<Op>,
}

impl Program {
    /// Convert sanitized code into instructions.
    ///
    /// Any character outside `><+-.,[]` is rejected; run [`sanitize`] first when
    /// the source may contain comments.
    pub fn parse(code: &str) -> Result<Self, EngineError> {
        let ops = code
            .chars()
            .enumerate()
            .map(|(ip, ch)| Op::from_char(ch).ok_or(EngineError::InvalidCharacter { ch, ip }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ops })
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of `,` instructions, i.e. how many static input entries a run wants.
    pub fn input_count(&self) -> usize {
        self.ops.iter().filter(|&&op| op == Op::Input).count()
    }
}
