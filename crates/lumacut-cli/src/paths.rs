// crates/lumacut-cli/src/paths.rs
// Single source of truth for where lumacut looks for its config file.

use std::path::PathBuf;

/// `%APPDATA%\Lumacut` on Windows, `$XDG_CONFIG_HOME/lumacut` or
/// `~/.config/lumacut` elsewhere.
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    let dir = std::env::var("APPDATA")
        .map(|a| PathBuf::from(a).join("Lumacut"))
        .unwrap_or_else(|_| std::env::temp_dir().join("Lumacut"));
    #[cfg(not(target_os = "windows"))]
    let dir = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|x| !x.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config")))
        .unwrap_or_else(std::env::temp_dir)
        .join("lumacut");
    dir
}

pub fn config_file() -> PathBuf {
    config_dir().join("config.json")
}
