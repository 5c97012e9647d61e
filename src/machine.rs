//! The tape machine and the engine entry point.
//!
//! The machine owns a circular tape of 30,000 cells (by default) and a single
//! data pointer:
//! - Moving left from cell 0 lands on the last cell; moving right past the
//!   last cell lands on cell 0.
//! - Cells hold values `0..=254`; `+` and `-` wrap modulo 255.
//! - `.` and `,` go through an [`OutputSink`] and an [`InputSource`], so the
//!   machine itself never touches stdin or stdout.

use std::io;

use crate::io::{
    Accumulator, AnnotatedOutput, BufferedInput, InputSource, IoMode, LineInput, OutputSink,
    PlainOutput, CELL_MODULUS,
};
use crate::program::{Op, Program};
use crate::resolver::{self, JumpMap};
use crate::EngineError;

/// Number of cells on a default tape.
pub const TAPE_LEN: usize = 30_000;

/// Highest value a cell can hold.
const CELL_MAX: u8 = (CELL_MODULUS - 1) as u8;

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Buffered output; always empty for dynamic modes.
    pub output: String,
    /// The whole tape as it was when the program halted.
    pub tape: Vec<u8>,
}

/// A circular tape with a data pointer.
#[derive(Debug, Clone)]
pub struct TapeMachine {
    memory: Vec<u8>,
    pointer: usize,
}

impl Default for TapeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TapeMachine {
    /// Create a machine with 30,000 zeroed cells.
    pub fn new() -> Self {
        Self::with_tape_len(TAPE_LEN)
    }

    /// Create a machine with a custom tape length (at least one cell).
    pub fn with_tape_len(len: usize) -> Self {
        Self {
            memory: vec![0; len.max(1)],
            pointer: 0,
        }
    }

    pub fn tape(&self) -> &[u8] {
        &self.memory
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn into_tape(self) -> Vec<u8> {
        self.memory
    }

    /// Execute `program` until the instruction pointer runs off the end.
    ///
    /// `jumps` must come from [`resolver::resolve`] on the same program.
    pub fn run(
        &mut self,
        program: &Program,
        jumps: &JumpMap,
        input: &mut dyn InputSource,
        output: &mut dyn OutputSink,
    ) -> Result<(), EngineError> {
        let ops = program.ops();
        let tape_len = self.memory.len();
        let mut code_ptr = 0;

        while code_ptr < ops.len() {
            let cell = &mut self.memory[self.pointer];
            match ops[code_ptr] {
                Op::Right => self.pointer = (self.pointer + 1) % tape_len,
                Op::Left => self.pointer = (self.pointer + tape_len - 1) % tape_len,
                Op::Inc => *cell = if *cell >= CELL_MAX { 0 } else { *cell + 1 },
                Op::Dec => *cell = if *cell == 0 { CELL_MAX } else { *cell - 1 },
                Op::Output => output
                    .write_cell(*cell)
                    .map_err(|source| EngineError::Io { ip: code_ptr, source })?,
                Op::Input => {
                    *cell = input
                        .read_cell()
                        .map_err(|source| EngineError::Io { ip: code_ptr, source })?;
                }
                Op::LoopOpen => {
                    if *cell == 0 {
                        code_ptr = jump_target(jumps, code_ptr);
                    }
                }
                Op::LoopClose => {
                    if *cell != 0 {
                        code_ptr = jump_target(jumps, code_ptr);
                    }
                }
            }
            code_ptr += 1;
        }

        Ok(())
    }
}

fn jump_target(jumps: &JumpMap, pos: usize) -> usize {
    jumps
        .target(pos)
        .expect("jump map covers every bracket of a resolved program")
}

/// Sanitized code in, output and tape out.
///
/// Brackets are validated before any instruction runs. `input` feeds `,` in
/// [`IoMode::Static`]; dynamic modes read lines from stdin and print to stdout
/// as the program runs.
pub fn execute(code: &str, mode: IoMode, input: Vec<u8>) -> Result<Execution, EngineError> {
    let program = Program::parse(code)?;
    let jumps = resolver::resolve(&program)?;
    execute_resolved(&program, &jumps, mode, input)
}

/// Run an already resolved program on a fresh tape.
///
/// Lets a caller report bracket errors (or do anything else) between
/// resolution and execution.
pub fn execute_resolved(
    program: &Program,
    jumps: &JumpMap,
    mode: IoMode,
    input: Vec<u8>,
) -> Result<Execution, EngineError> {
    let mut machine = TapeMachine::new();
    log::debug!("running {} instruction(s) in {:?} mode", program.len(), mode);

    let output = match mode {
        IoMode::Static => {
            let mut source = BufferedInput::new(input);
            let mut sink = Accumulator::new();
            machine.run(program, jumps, &mut source, &mut sink)?;
            log::debug!("consumed {} static input read(s)", source.cursor());
            sink.into_string()
        }
        IoMode::DynamicAnnotated | IoMode::DynamicPlain => {
            let stdin = io::stdin();
            let mut source = LineInput::for_mode(stdin.lock(), io::stdout(), mode);
            if mode == IoMode::DynamicAnnotated {
                let mut sink = AnnotatedOutput::new(io::stdout());
                machine.run(program, jumps, &mut source, &mut sink)?;
            } else {
                // Each write flushes, so nothing is left buffered afterwards
                let mut sink = PlainOutput::new(io::stdout());
                machine.run(program, jumps, &mut source, &mut sink)?;
            }
            String::new()
        }
    };

    log::debug!("program halted with data pointer at {}", machine.pointer());
    Ok(Execution {
        output,
        tape: machine.into_tape(),
    })
}
