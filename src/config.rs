use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use cross_xdg::BaseDirs;

use crate::IoMode;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "BF_CONFIG";

/// Run defaults read from `bf.toml`; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunDefaults {
    pub tape_output: Option<i64>,
    pub io_mode: Option<IoMode>,
}

static DEFAULTS: OnceLock<RunDefaults> = OnceLock::new();

pub fn defaults() -> &'static RunDefaults {
    DEFAULTS.get_or_init(|| load().unwrap_or_default())
}

fn config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(explicit));
    }

    // On Linux: resolves to /home/<user>/.config
    // On macOS: resolves to /Users/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bf.toml");
    Some(path)
}

fn load() -> Option<RunDefaults> {
    let path = config_path()?;
    let content = fs::read_to_string(&path).ok()?;
    log::debug!("loaded run defaults from {}", path.display());
    Some(parse(&content))
}

/// Parse the `[run]` section of a config file.
///
/// Only `key = value` lines are understood; values may be quoted. Unknown keys
/// are ignored and bad values are skipped with a warning.
pub fn parse(content: &str) -> RunDefaults {
    let mut in_run = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        if line.starts_with('[') && line.ends_with(']') {
            in_run = &line[1..line.len()-1] == "run";
            continue;
        }
        if !in_run { continue; }
        if let Some((key, val_raw)) = line.split_once('=') {
            let val_raw = val_raw.trim();
            let val = val_raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val_raw);
            map.insert(key.trim().to_string(), val.to_string());
        }
    }

    let mut cfg = RunDefaults::default();

    if let Some(raw) = map.get("tape_output") {
        match raw.parse::<i64>() {
            Ok(n) => cfg.tape_output = Some(n),
            Err(e) => log::warn!("ignoring tape_output = {raw:?} in config: {e}"),
        }
    }
    if let Some(raw) = map.get("io_mode") {
        match raw.parse::<IoMode>() {
            Ok(mode) => cfg.io_mode = Some(mode),
            Err(e) => log::warn!("ignoring io_mode in config: {e}"),
        }
    }

    cfg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_run_section_only() {
        let cfg = parse(
            r#"
# defaults for bf
[colors]
tape_output = 9

[run]
tape_output = 3
io_mode = "dynamic-clean"
"#,
        );
        assert_eq!(cfg.tape_output, Some(3));
        assert_eq!(cfg.io_mode, Some(IoMode::DynamicPlain));
    }

    #[test]
    fn bad_values_are_skipped() {
        let cfg = parse("[run]\ntape_output = lots\nio_mode = loud\n");
        assert_eq!(cfg, RunDefaults::default());
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse(""), RunDefaults::default());
    }
}
