use std::path::PathBuf;

/// Returns the base directory for Voxgate data.
///
/// Uses `$VOXGATE_HOME` if set, otherwise defaults to `~/.a3s/voxgate`.
pub fn voxgate_home() -> PathBuf {
    if let Ok(home) = std::env::var("VOXGATE_HOME") {
        return PathBuf::from(home);
    }

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".a3s")
        .join("voxgate")
}

/// Returns the path to the user configuration file.
pub fn config_path() -> PathBuf {
    voxgate_home().join("config.toml")
}

/// Ensure the data directory exists.
pub fn ensure_dirs() -> std::io::Result<()> {
    std::fs::create_dir_all(voxgate_home())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_from_env() {
        std::env::set_var("VOXGATE_HOME", "/tmp/test-voxgate");
        assert_eq!(voxgate_home(), PathBuf::from("/tmp/test-voxgate"));
        assert_eq!(config_path(), PathBuf::from("/tmp/test-voxgate/config.toml"));
        std::env::remove_var("VOXGATE_HOME");
    }
}
