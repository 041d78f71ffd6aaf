use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_preview: bool,
    pub perf: bool,
    pub name: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_preview: self.no_preview || other.no_preview,
            perf: self.perf || other.perf,
            name: other.name.clone().or_else(|| self.name.clone()),
            export_dir: other.export_dir.clone().or_else(|| self.export_dir.clone()),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("markpad").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("markpad")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("markpad").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("markpad").join("config");
        }
    }

    PathBuf::from(".markpadrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".markpadrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

const VALUE_FLAGS: [&str; 3] = ["--name", "--export-dir", "--render-debug-log"];

/// Tokens for one flag-file line. A value flag keeps the rest of the line
/// verbatim, so `--name=my notes` and `--name my notes` both carry `my notes`.
fn line_tokens(line: &str) -> Vec<String> {
    let split_at = line.find(['=', ' ', '\t']);
    let (flag, value) = match split_at {
        Some(at) => (&line[..at], Some(&line[at..])),
        None => (line, None),
    };
    match value {
        Some(rest) if VALUE_FLAGS.contains(&flag) => {
            let value = rest
                .strip_prefix('=')
                .unwrap_or_else(|| rest.trim_start());
            vec![format!("{flag}={value}")]
        }
        _ => line.split_whitespace().map(ToOwned::to_owned).collect(),
    }
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# markpad defaults (saved with --save)".to_string());
    if flags.no_preview {
        lines.push("--no-preview".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(name) = &flags.name {
        lines.push(format!("--name={name}"));
    }
    if let Some(dir) = &flags.export_dir {
        lines.push(format!("--export-dir={}", dir.display()));
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log={}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the persistable flags out of raw arguments. Unknown tokens are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-preview" {
            flags.no_preview = true;
        } else if token == "--perf" {
            flags.perf = true;
        } else if token == "--name" {
            if let Some(next) = tokens.get(i + 1) {
                flags.name = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--name=") {
            flags.name = Some(value.to_string());
        } else if token == "--export-dir" {
            if let Some(next) = tokens.get(i + 1) {
                flags.export_dir = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--export-dir=") {
            flags.export_dir = Some(PathBuf::from(value));
        } else if token == "--render-debug-log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.render_debug_log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--render-debug-log=") {
            flags.render_debug_log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}
