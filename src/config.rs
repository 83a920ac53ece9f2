//! Saved default flags.
//!
//! Defaults are stored as plain command-line tokens, one or more per line,
//! with `#` comments. The global file lives in the platform config
//! directory and `./.redrc` overrides it for one project.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::ui::style::Palette;

/// Which color table to draw with.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    /// Pick from `COLORTERM` / `TERM`
    Auto,
    /// xterm 256-color palette
    #[value(name = "256")]
    Indexed256,
    /// Basic ANSI colors
    #[value(name = "16")]
    Ansi16,
}

impl PaletteMode {
    pub fn resolve(self) -> Palette {
        match self {
            Self::Auto => Palette::detect(),
            Self::Indexed256 => Palette::Indexed256,
            Self::Ansi16 => Palette::Ansi16,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Indexed256 => "256",
            Self::Ansi16 => "16",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub log_file: Option<PathBuf>,
    pub palette: Option<PaletteMode>,
}

impl ConfigFlags {
    /// Merge `other` on top of `self`: booleans OR together, options from
    /// `other` win when set.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
            palette: other.palette.or(self.palette),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("red").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("red")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("red").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("red").join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".redrc")
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
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# red defaults (saved with --save)".to_string()];
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(palette) = flags.palette {
        lines.push(format!("--palette {}", palette.as_str()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

/// Pick the flags this module knows about out of raw arguments. Anything
/// else, including the file name, is skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        if token == "--perf" {
            flags.perf = true;
        } else if token == "--log-file" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log_file = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log-file=") {
            flags.log_file = Some(PathBuf::from(value));
        } else if token == "--palette" {
            if let Some(next) = tokens.get(i + 1) {
                flags.palette = parse_palette(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--palette=") {
            flags.palette = parse_palette(value);
        }
        i += 1;
    }
    flags
}

fn parse_palette(s: &str) -> Option<PaletteMode> {
    match s {
        "auto" => Some(PaletteMode::Auto),
        "256" => Some(PaletteMode::Indexed256),
        "16" => Some(PaletteMode::Ansi16),
        _ => None,
    }
}
