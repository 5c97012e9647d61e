//! A Brainfuck interpreter library with a circular tape.
//!
//! Features and behaviors:
//! - Memory tape of 30,000 cells initialized to 0.
//! - Circular pointer: moving left from cell 0 lands on the last cell and
//!   moving right past the last cell lands on cell 0.
//! - Cells hold `0..=254`; `+` and `-` wrap modulo 255.
//! - Brackets are matched before execution; an unmatched `[` or `]` is reported
//!   with its position and nothing runs.
//! - Static I/O reads `,` from a pre-collected buffer (0 once exhausted) and
//!   returns output as a string; dynamic I/O reads a line per `,` and prints
//!   each `.` immediately.
//!
//! Quick start:
//!
//! ```
//! use tape_bf::{execute, sanitize, IoMode};
//!
//! let code = sanitize("++ increment twice then print .");
//! let result = execute(&code, IoMode::Static, Vec::new()).expect("program should run");
//! assert_eq!(result.output, "\u{2}");
//! assert_eq!(result.tape[0], 2);
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod io;
pub mod machine;
pub mod program;
pub mod resolver;

pub use error::{EngineError, InputCountError, SyntaxError, UnknownIoMode, UnmatchedBracketKind};
pub use io::{IoMode, decode_entry, parse_static_entries};
pub use machine::{Execution, TAPE_LEN, TapeMachine, execute, execute_resolved};
pub use program::{Op, Program, sanitize};
pub use resolver::{JumpMap, resolve};
