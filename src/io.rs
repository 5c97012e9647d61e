//! Input sources, output sinks, and the I/O mode that picks between them.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::{InputCountError, UnknownIoMode};

/// Cell values are kept below this modulus.
pub const CELL_MODULUS: u32 = 255;

/// Separator between static input entries collected on one line.
pub const ENTRY_SEPARATOR: &str = "::";

/// How `.` and `,` talk to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IoMode {
    /// Input comes from a pre-collected buffer; output is returned at the end.
    #[default]
    Static,
    /// Each read prompts with `[i]: `; each write prints `[o]: c` on its own line.
    DynamicAnnotated,
    /// Reads block for a line without a prompt; writes print the raw character.
    DynamicPlain,
}

impl IoMode {
    pub fn is_dynamic(self) -> bool {
        !matches!(self, IoMode::Static)
    }
}

impl FromStr for IoMode {
    type Err = UnknownIoMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(IoMode::Static),
            "dynamic" | "dynamic-annotated" => Ok(IoMode::DynamicAnnotated),
            "dynamic-clean" | "dynamic-plain" => Ok(IoMode::DynamicPlain),
            other => Err(UnknownIoMode(other.to_string())),
        }
    }
}

/// Supplies values for `,`.
pub trait InputSource {
    /// Produce the next cell value.
    fn read_cell(&mut self) -> io::Result<u8>;
}

/// Receives values written by `.`.
pub trait OutputSink {
    fn write_cell(&mut self, value: u8) -> io::Result<()>;
}

/// Pre-collected input consumed front to back; reads past the end yield 0.
#[derive(Debug, Clone, Default)]
pub struct BufferedInput {
    values: Vec<u8>,
    cursor: usize,
}

impl BufferedInput {
    pub fn new(values: Vec<u8>) -> Self {
        Self { values, cursor: 0 }
    }

    /// How many reads have happened, including reads past the end.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl InputSource for BufferedInput {
    fn read_cell(&mut self) -> io::Result<u8> {
        let value = self.values.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        Ok(value)
    }
}

/// Interactive input: one line per read, optionally preceded by a prompt.
///
/// An empty line or EOF reads as 0.
pub struct LineInput<R, W> {
    reader: R,
    prompt_out: W,
    prompt: &'static str,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    pub fn new(reader: R, prompt_out: W, prompt: &'static str) -> Self {
        Self { reader, prompt_out, prompt }
    }

    /// Prompt variant matching `mode`.
    pub fn for_mode(reader: R, prompt_out: W, mode: IoMode) -> Self {
        let prompt = if mode == IoMode::DynamicAnnotated { "[i]: " } else { "" };
        Self::new(reader, prompt_out, prompt)
    }
}

impl<R: BufRead, W: Write> InputSource for LineInput<R, W> {
    fn read_cell(&mut self) -> io::Result<u8> {
        if !self.prompt.is_empty() {
            write!(self.prompt_out, "{}", self.prompt)?;
        }
        self.prompt_out.flush()?;

        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(fold_cell(decode_entry(line.trim())))
    }
}

/// Collects output into a string, returned once the run ends.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    text: String,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl OutputSink for Accumulator {
    fn write_cell(&mut self, value: u8) -> io::Result<()> {
        self.text.push(char::from(value));
        Ok(())
    }
}

/// Prints every character immediately as `[o]: c` followed by a newline.
pub struct AnnotatedOutput<W> {
    out: W,
}

impl<W: Write> AnnotatedOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for AnnotatedOutput<W> {
    fn write_cell(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.out, "[o]: {}", char::from(value))?;
        self.out.flush()
    }
}

/// Prints every character immediately with no decoration.
pub struct PlainOutput<W> {
    out: W,
}

impl<W: Write> PlainOutput<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for PlainOutput<W> {
    fn write_cell(&mut self, value: u8) -> io::Result<()> {
        write!(self.out, "{}", char::from(value))?;
        self.out.flush()
    }
}

/// Bring an arbitrary code point into cell range.
pub fn fold_cell(code_point: u32) -> u8 {
    (code_point % CELL_MODULUS) as u8
}

/// Decode one input entry to a code point.
///
/// Empty text is 0. A leading backslash escape (`\n`, `\t`, `\xHH`, `\uHHHH`, ...)
/// is decoded; anything else yields the code point of the first character.
pub fn decode_entry(text: &str) -> u32 {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    if first != '\\' {
        return first as u32;
    }

    let rest = chars.as_str();
    let Some(tag) = rest.chars().next() else {
        return '\\' as u32;
    };
    let simple = match tag {
        'n' => Some(0x0A),
        't' => Some(0x09),
        'r' => Some(0x0D),
        '0' => Some(0x00),
        'a' => Some(0x07),
        'b' => Some(0x08),
        'f' => Some(0x0C),
        'v' => Some(0x0B),
        '\\' | '\'' | '"' => Some(tag as u32),
        _ => None,
    };
    if let Some(value) = simple {
        return value;
    }

    let digits = match tag {
        'x' => 2,
        'u' => 4,
        _ => return '\\' as u32,
    };
    rest.get(1..1 + digits)
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .unwrap_or('\\' as u32)
}

/// Split a `::`-separated line into exactly `expected` decoded input values.
pub fn parse_static_entries(line: &str, expected: usize) -> Result<Vec<u8>, InputCountError> {
    let entries: Vec<&str> = line.trim().split(ENTRY_SEPARATOR).collect();
    if entries.len() != expected {
        return Err(InputCountError { expected, got: entries.len() });
    }
    Ok(entries
        .into_iter()
        .map(|entry| fold_cell(decode_entry(entry)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn buffered_input_yields_zero_when_exhausted() {
        let mut input = BufferedInput::new(vec![65]);
        assert_eq!(input.read_cell().unwrap(), 65);
        assert_eq!(input.read_cell().unwrap(), 0);
        assert_eq!(input.read_cell().unwrap(), 0);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn line_input_prompts_and_decodes_first_char() {
        let reader = Cursor::new(&b"Hello\n\n"[..]);
        let mut prompts = Vec::new();
        {
            let mut input = LineInput::for_mode(reader, &mut prompts, IoMode::DynamicAnnotated);
            assert_eq!(input.read_cell().unwrap(), b'H');
            assert_eq!(input.read_cell().unwrap(), 0);
            // EOF behaves like an empty line
            assert_eq!(input.read_cell().unwrap(), 0);
        }
        assert_eq!(String::from_utf8(prompts).unwrap(), "[i]: [i]: [i]: ");
    }

    #[test]
    fn plain_line_input_has_no_prompt() {
        let reader = Cursor::new(&b"  z  \n"[..]);
        let mut prompts = Vec::new();
        {
            let mut input = LineInput::for_mode(reader, &mut prompts, IoMode::DynamicPlain);
            assert_eq!(input.read_cell().unwrap(), b'z');
        }
        assert!(prompts.is_empty());
    }

    #[test]
    fn annotated_output_labels_each_char() {
        let mut sink = AnnotatedOutput::new(Vec::new());
        sink.write_cell(b'h').unwrap();
        sink.write_cell(b'i').unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "[o]: h\n[o]: i\n");
    }

    #[test]
    fn plain_output_writes_raw_chars() {
        let mut sink = PlainOutput::new(Vec::new());
        sink.write_cell(b'h').unwrap();
        sink.write_cell(b'i').unwrap();
        assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "hi");
    }

    #[test]
    fn decode_entry_handles_escapes() {
        assert_eq!(decode_entry(""), 0);
        assert_eq!(decode_entry("A"), 65);
        assert_eq!(decode_entry("ABC"), 65);
        assert_eq!(decode_entry("\\n"), 10);
        assert_eq!(decode_entry("\\t"), 9);
        assert_eq!(decode_entry("\\0"), 0);
        assert_eq!(decode_entry("\\\\"), 92);
        assert_eq!(decode_entry("\\x41"), 65);
        assert_eq!(decode_entry("\\u00e9"), 0xE9);
        assert_eq!(decode_entry("\\"), 92);
        assert_eq!(decode_entry("\\q"), 92);
        assert_eq!(decode_entry("\\xZZ"), 92);
    }

    #[test]
    fn fold_cell_wraps_at_modulus() {
        assert_eq!(fold_cell(254), 254);
        assert_eq!(fold_cell(255), 0);
        assert_eq!(fold_cell(0x3BB), (0x3BB % 255) as u8);
    }

    #[test]
    fn static_entries_must_match_count() {
        assert_eq!(parse_static_entries("A::B", 2).unwrap(), vec![65, 66]);
        assert_eq!(parse_static_entries("A::::\\n", 3).unwrap(), vec![65, 0, 10]);
        assert_eq!(
            parse_static_entries("A::B", 1),
            Err(InputCountError { expected: 1, got: 2 })
        );
    }

    #[test]
    fn io_mode_parses_config_names() {
        assert_eq!("static".parse::<IoMode>(), Ok(IoMode::Static));
        assert_eq!("Dynamic".parse::<IoMode>(), Ok(IoMode::DynamicAnnotated));
        assert_eq!("dynamic-clean".parse::<IoMode>(), Ok(IoMode::DynamicPlain));
        assert_eq!("Loud".parse::<IoMode>(), Err(UnknownIoMode("loud".to_string())));
        assert_eq!(UnknownIoMode("loud".to_string()).to_string(), "unknown I/O mode 'loud'");
        assert!(!IoMode::Static.is_dynamic());
        assert!(IoMode::DynamicPlain.is_dynamic());
    }
}
