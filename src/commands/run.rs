use clap::Args;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use crate::cli_util::{format_cells, print_engine_error, print_error, tape_window};
use crate::{config, execute_resolved, parse_static_entries, resolve, sanitize, IoMode, Program};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Read Brainfuck code from PATH instead of positional "<code>"
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<String>,

    /// Print the first 2^N tape cells after the run
    #[arg(short = 't', long = "tape-output", value_name = "N", allow_negative_numbers = true)]
    pub tape_output: Option<i64>,

    /// Dynamic I/O stream with notation
    #[arg(short = 'd', long = "dynamic-io")]
    pub dynamic_io: bool,

    /// Dynamic I/O stream without notation
    #[arg(short = 'c', long = "dynamic-clean-io")]
    pub dynamic_clean_io: bool,

    /// Static input entries separated by "::" (skips the prompt)
    #[arg(short = 'e', long = "entries", value_name = "TEXT")]
    pub entries: Option<String>,

    /// Concatenated Brainfuck code parts
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

impl RunArgs {
    /// Flags first, then the config file, then static I/O.
    fn io_mode(&self) -> IoMode {
        if self.dynamic_clean_io {
            IoMode::DynamicPlain
        } else if self.dynamic_io {
            IoMode::DynamicAnnotated
        } else {
            config::defaults().io_mode.unwrap_or_default()
        }
    }
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    if args.input.is_none() && args.code.is_empty() {
        usage_and_exit(program, 2);
    }

    if args.input.is_some() && !args.code.is_empty() {
        eprintln!("{program}: cannot use positional code together with --input");
        usage_and_exit(program, 2);
    }

    // Ctrl+c anywhere (prompt or running program) ends the run politely
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        eprintln!("\nProcess interrupted by user.");
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        log::warn!("failed to set ctrl+c handler: {e}");
    }

    let mode = args.io_mode();
    let tape_output = args.tape_output.or(config::defaults().tape_output);

    let raw = if let Some(path) = args.input.as_deref() {
        if !Path::new(path).exists() {
            print_error(&format!("File {path} does not exist"));
            return 1;
        }
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                print_error(&format!("failed to read {path}: {e}"));
                return 1;
            }
        }
    } else {
        args.code.join("")
    };

    let code = sanitize(&raw);
    log::debug!("sanitized {} source char(s) into {} instruction(s)", raw.chars().count(), code.chars().count());

    // Brackets are checked before asking for input or announcing the run
    let prepared = Program::parse(&code)
        .and_then(|parsed| Ok((resolve(&parsed)?, parsed)));
    let (jumps, parsed) = match prepared {
        Ok(prepared) => prepared,
        Err(err) => {
            print_engine_error(&code, &err);
            return 1;
        }
    };

    let input = if mode == IoMode::Static {
        match collect_static_input(parsed.input_count(), args.entries.as_deref()) {
            Ok(values) => values,
            Err(msg) => {
                print_error(&msg);
                return 1;
            }
        }
    } else {
        Vec::new()
    };

    println!(">>> Program is running...");
    let _ = io::stdout().flush();

    let result = match execute_resolved(&parsed, &jumps, mode, input) {
        Ok(result) => result,
        Err(err) => {
            print_engine_error(&code, &err);
            return 1;
        }
    };

    match mode {
        IoMode::Static => println!(">>> Output\n{}", result.output),
        // Plain dynamic output leaves the cursor mid-line
        IoMode::DynamicPlain => println!(),
        IoMode::DynamicAnnotated => {}
    }

    if let Some(cells) = tape_output.and_then(|n| tape_window(&result.tape, n)) {
        println!(">>> Tape Snapshot: {}", format_cells(cells));
    }

    let _ = io::stdout().flush();
    0
}

/// Gather one static input value per `,`, from `--entries` or an interactive prompt.
fn collect_static_input(wanted: usize, entries: Option<&str>) -> Result<Vec<u8>, String> {
    if wanted == 0 {
        return Ok(Vec::new());
    }

    let line = match entries {
        Some(text) => text.to_string(),
        None => {
            let plural = if wanted > 1 { "ies" } else { "y" };
            print!("Please fill {wanted} input entr{plural} (separate by ::): ");
            io::stdout().flush().map_err(|e| e.to_string())?;

            let mut line = String::new();
            io::stdin().lock().read_line(&mut line).map_err(|e| e.to_string())?;
            line
        }
    };

    parse_static_entries(&line, wanted).map_err(|e| {
        log::debug!("{e}");
        "Invalid input size".to_string()
    })
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} [OPTIONS] "<code>"
  {0} [OPTIONS] --input <PATH>

Options:
  --input,            -i <PATH>  Read Brainfuck code from PATH instead of positional "<code>"
  --tape-output,      -t <N>     Print the first 2^N tape cells after the run (N > 0)
  --dynamic-io,       -d         Dynamic I/O stream with notation ([i]: / [o]: )
  --dynamic-clean-io, -c         Dynamic I/O stream without notation
  --entries,          -e <TEXT>  Static input entries separated by "::"
  --verbose                      Log engine activity to stderr
  --version,          -v         Show version
  --help,             -h         Show this help

Notes:
- Characters outside of Brainfuck's ><+-.,[] are ignored; error positions count
  only the remaining instructions.
- The tape is circular (30,000 cells) and cells wrap modulo 255.
- In static mode you are asked for one entry per `,`; a missing entry reads as 0.

Config:
  Defaults for `tape_output` and `io_mode` ("static", "dynamic", "dynamic-clean")
  are read from the [run] section of $XDG_CONFIG_HOME/bf.toml, or from $BF_CONFIG.

Examples:
- Run a program file:
    {0} --input ./hello.bf
- Echo one character and show the first 4 cells:
    {0} -e A -t 2 ",."
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
