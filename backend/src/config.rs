//! Runtime settings loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_FLASH_TTL;

const DEFAULT_DATA_DIR: &str = "koperasi-data";

/// Settings for the `koperasi` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KOPERASI")]
pub struct KoperasiSettings {
    /// Directory holding one JSON file per storage key.
    pub data_dir: Option<PathBuf>,
    /// Seconds a success message stays visible.
    pub flash_ttl_secs: Option<u64>,
}

impl KoperasiSettings {
    /// Return the configured data directory, falling back to `./koperasi-data`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Return the configured flash lifetime, falling back to three seconds.
    pub fn flash_ttl(&self) -> Duration {
        self.flash_ttl_secs
            .map_or(DEFAULT_FLASH_TTL, Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> KoperasiSettings {
        KoperasiSettings::load_from_iter([OsString::from("koperasi")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("KOPERASI_DATA_DIR", None::<String>),
            ("KOPERASI_FLASH_TTL_SECS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(settings.flash_ttl(), Duration::from_secs(3));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("KOPERASI_DATA_DIR", Some("/tmp/koperasi-store".to_owned())),
            ("KOPERASI_FLASH_TTL_SECS", Some("10".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.data_dir(), PathBuf::from("/tmp/koperasi-store"));
        assert_eq!(settings.flash_ttl(), Duration::from_secs(10));
    }
}
