use std::io::{self, IsTerminal, Write};
use nu_ansi_term::Color;
use crate::EngineError;

/// "Error:" label, painted red when stderr is a terminal.
pub fn error_label() -> String {
    if io::stderr().is_terminal() {
        Color::Red.bold().paint("Error:").to_string()
    } else {
        "Error:".to_string()
    }
}

/// Print a one-line error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {msg}", error_label());
    let _ = io::stderr().flush();
}

/// Print an engine error followed by a caret context window over the sanitized code.
pub fn print_engine_error(code: &str, err: &EngineError) {
    print_error(&err.to_string());
    print_context(code, err.position());
}

/// Print a short window of `code` around `pos` with a caret under it.
pub fn print_context(code: &str, pos: usize) {
    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = code.chars().count();
    if total_chars == 0 {
        return;
    }
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let slice: String = code.chars().skip(start_char).take(end_char - start_char).collect();
    eprintln!("  {}", slice);

    // Caret under the exact position
    let caret_offset_chars = pos.saturating_sub(start_char);
    eprintln!("  {}^", " ".repeat(caret_offset_chars));
    let _ = io::stderr().flush();
}

/// The first `2^exp` cells of `tape`, or `None` when `exp` asks for no display.
pub fn tape_window(tape: &[u8], exp: i64) -> Option<&[u8]> {
    if exp <= 0 {
        return None;
    }
    let len = u32::try_from(exp)
        .ok()
        .and_then(|e| 1usize.checked_shl(e))
        .map_or(tape.len(), |n| n.min(tape.len()));
    Some(&tape[..len])
}

/// Render cells as `[a, b, c]`.
pub fn format_cells(cells: &[u8]) -> String {
    let joined = cells
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tape_window_takes_power_of_two_prefix() {
        let tape = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        assert_eq!(tape_window(&tape, 1), Some(&tape[..2]));
        assert_eq!(tape_window(&tape, 3), Some(&tape[..8]));
    }

    #[test]
    fn tape_window_caps_at_tape_length() {
        let tape = [0u8; 4];
        assert_eq!(tape_window(&tape, 5).map(<[u8]>::len), Some(4));
        assert_eq!(tape_window(&tape, 200).map(<[u8]>::len), Some(4));
    }

    #[test]
    fn non_positive_exponent_hides_tape() {
        let tape = [0u8; 4];
        assert_eq!(tape_window(&tape, 0), None);
        assert_eq!(tape_window(&tape, -2), None);
    }

    #[test]
    fn cells_render_like_a_list() {
        assert_eq!(format_cells(&[2, 0, 254]), "[2, 0, 254]");
        assert_eq!(format_cells(&[]), "[]");
    }
}
