use std::path::{Path, PathBuf};

use super::types::{AppConfig, DEFAULT_CAPTURE_PATH};

/// Get the default kroviz data directory: ~/.kroviz
pub fn get_kroviz_data_dir() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home.join(".kroviz"))
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    Ok(toml::from_str::<AppConfig>(&s)?)
}

/// Load an explicitly named config file, then apply the same data dir
/// defaults and env overrides as [`load_default`].
pub fn load_explicit(path: &Path) -> anyhow::Result<AppConfig> {
    let mut cfg = load_from_path(path)?;
    apply_data_dir_defaults(&mut cfg, &get_kroviz_data_dir()?)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

/// Move the default capture file into `data_dir`, creating it if needed.
pub fn apply_data_dir_defaults(cfg: &mut AppConfig, data_dir: &Path) -> anyhow::Result<()> {
    if cfg.capture.path == DEFAULT_CAPTURE_PATH {
        std::fs::create_dir_all(data_dir)?;
        cfg.capture.path = data_dir
            .join("events.jsonl")
            .to_string_lossy()
            .to_string();
    }
    Ok(())
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.kroviz/config.toml (highest)
    let kroviz_dir = get_kroviz_data_dir()?;
    let kroviz_config = kroviz_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if kroviz_config.exists() {
        load_from_path(&kroviz_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    apply_data_dir_defaults(&mut cfg, &kroviz_dir)?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(v) = std::env::var("KROVIZ_BASE_URL") {
        if !v.trim().is_empty() {
            cfg.backend.base_url = v;
        }
    }
    if let Ok(v) = std::env::var("KROVIZ_USER") {
        if !v.trim().is_empty() {
            cfg.backend.user = v;
        }
    }
    if let Ok(v) = std::env::var("KROVIZ_PASSWORD") {
        if !v.trim().is_empty() {
            cfg.backend.password = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_path_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\ntimeout_ms = 250\n\n[capture]\npath = \"/tmp/x.jsonl\"").unwrap();

        let cfg = load_from_path(file.path()).unwrap();
        assert_eq!(cfg.backend.timeout_ms, 250);
        assert_eq!(cfg.capture.path, "/tmp/x.jsonl");
    }

    #[test]
    fn test_load_from_path_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend\ntimeout_ms = ").unwrap();
        assert!(load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_default_capture_path_moves_into_fresh_data_dir() {
        let home = tempfile::tempdir().unwrap();
        let data_dir = home.path().join(".kroviz");
        let mut cfg = AppConfig::default();

        apply_data_dir_defaults(&mut cfg, &data_dir).unwrap();

        assert!(data_dir.is_dir());
        assert!(cfg.capture.path.ends_with(".kroviz/events.jsonl"));
    }

    #[test]
    fn test_custom_capture_path_is_kept() {
        let home = tempfile::tempdir().unwrap();
        let data_dir = home.path().join(".kroviz");
        let mut cfg = AppConfig::default();
        cfg.capture.path = "/srv/captures/demo.jsonl".to_string();

        apply_data_dir_defaults(&mut cfg, &data_dir).unwrap();

        assert_eq!(cfg.capture.path, "/srv/captures/demo.jsonl");
        assert!(!data_dir.exists());
    }

    #[test]
    fn test_load_default_on_fresh_home_uses_data_dir() {
        let home = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        let prev_home = std::env::var_os("HOME");
        let prev_cwd = std::env::current_dir().unwrap();
        std::env::set_var("HOME", home.path());
        std::env::set_current_dir(cwd.path()).unwrap();

        let cfg = load_default();
        let explicit = {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            writeln!(file, "[backend]\ntimeout_ms = 250").unwrap();
            load_explicit(file.path())
        };

        std::env::set_current_dir(prev_cwd).unwrap();
        match prev_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let cfg = cfg.unwrap();
        assert!(cfg.capture.path.ends_with(".kroviz/events.jsonl"), "got {}", cfg.capture.path);
        assert!(home.path().join(".kroviz").is_dir());
        let explicit = explicit.unwrap();
        assert_eq!(explicit.backend.timeout_ms, 250);
        assert!(explicit.capture.path.ends_with(".kroviz/events.jsonl"));
    }
}
