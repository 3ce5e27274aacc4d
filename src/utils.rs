use std::path::PathBuf;

const APP_DIR: &str = "syncmark";

/// Directory holding `config.yml`
pub fn get_config_dir() -> PathBuf {
    resolve_config_dir(|key| std::env::var(key).ok())
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `$XDG_CONFIG_HOME/syncmark`, then `~/.config/syncmark`, then `%APPDATA%\syncmark`.
/// Unset and empty variables are skipped.
fn resolve_config_dir(var: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let var = |key: &str| var(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    var("XDG_CONFIG_HOME")
        .or_else(|| var("HOME").map(|home| home.join(".config")))
        .or_else(|| var("APPDATA"))
        .map(|base| base.join(APP_DIR))
}
