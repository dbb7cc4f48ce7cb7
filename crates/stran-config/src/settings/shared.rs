use std::sync::{Arc, RwLock};

use crate::schema::TranslatorConfig;

use super::{SettingsProvider, SettingsSnapshot};

/// Process-wide settings, initialised once from config and replaced
/// wholesale when the config file is reloaded.
#[derive(Clone)]
pub struct SharedSettings {
    inner: Arc<RwLock<TranslatorConfig>>,
}

impl SharedSettings {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Swap in new translator settings.
    pub fn replace(&self, config: TranslatorConfig) {
        match self.inner.write() {
            Ok(mut guard) => *guard = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
        tracing::debug!("translator settings replaced");
    }

    /// Full translator config (model, endpoint, timeout included).
    pub fn config(&self) -> TranslatorConfig {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SettingsProvider for SharedSettings {
    fn snapshot(&self) -> SettingsSnapshot {
        let config = self.config();
        SettingsSnapshot {
            api_key: config.api_key,
            target_language: config.target_language,
        }
    }
}

/// Fixed settings, for tests and headless use.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub SettingsSnapshot);

impl StaticSettings {
    pub fn new(api_key: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self(SettingsSnapshot {
            api_key: api_key.into(),
            target_language: target_language.into(),
        })
    }
}

impl SettingsProvider for StaticSettings {
    fn snapshot(&self) -> SettingsSnapshot {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_settings_snapshot_reflects_config() {
        let settings = SharedSettings::new(TranslatorConfig {
            api_key: "sk-1".into(),
            target_language: "ja".into(),
            ..Default::default()
        });
        let snapshot = settings.snapshot();
        assert_eq!(snapshot.api_key, "sk-1");
        assert_eq!(snapshot.target_language, "ja");
    }

    #[test]
    fn replace_does_not_alter_earlier_snapshots() {
        let settings = SharedSettings::new(TranslatorConfig {
            api_key: "sk-old".into(),
            ..Default::default()
        });
        let before = settings.snapshot();

        settings.replace(TranslatorConfig {
            api_key: "sk-new".into(),
            target_language: "de".into(),
            ..Default::default()
        });

        assert_eq!(before.api_key, "sk-old");
        assert_eq!(before.target_language, "ko");
        assert_eq!(settings.snapshot().api_key, "sk-new");
        assert_eq!(settings.snapshot().target_language, "de");
    }

    #[test]
    fn clones_share_state() {
        let a = SharedSettings::new(TranslatorConfig::default());
        let b = a.clone();
        a.replace(TranslatorConfig {
            api_key: "sk-shared".into(),
            ..Default::default()
        });
        assert_eq!(b.snapshot().api_key, "sk-shared");
    }

    #[test]
    fn static_settings_returns_fixed_snapshot() {
        let settings = StaticSettings::new("sk", "es");
        assert_eq!(settings.snapshot().target_language, "es");
        assert!(settings.snapshot().has_api_key());
    }
}
