use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults for `scriptdown format`, stored one flag per line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    /// Render inline markdown in paragraphs before formatting.
    pub markdown: bool,
    /// Wrap markup in a standalone HTML document.
    pub standalone: bool,
    /// Print structured blocks as JSON instead of markup.
    pub json: bool,
    pub title: Option<String>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            markdown: self.markdown || other.markdown,
            standalone: self.standalone || other.standalone,
            json: self.json || other.json,
            title: other.title.clone().or_else(|| self.title.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("scriptdown").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("scriptdown")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("scriptdown").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("scriptdown")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".scriptdownrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    // A flag's value is the rest of its line, so titles may contain spaces.
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| match line.split_once(char::is_whitespace) {
            Some((flag, value)) => vec![flag.to_string(), value.trim().to_string()],
            None => vec![line.to_string()],
        })
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# scriptdown defaults (saved with --save)".to_string());
    if flags.markdown {
        lines.push("--markdown".to_string());
    }
    if flags.standalone {
        lines.push("--standalone".to_string());
    }
    if flags.json {
        lines.push("--json".to_string());
    }
    if let Some(title) = &flags.title {
        lines.push(format!("--title {title}"));
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

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--markdown" {
            flags.markdown = true;
        } else if token == "--standalone" {
            flags.standalone = true;
        } else if token == "--json" {
            flags.json = true;
        } else if token == "--title" {
            if let Some(next) = tokens.get(i + 1) {
                flags.title = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--title=") {
            flags.title = Some(value.to_string());
        }
        i += 1;
    }
    flags
}
