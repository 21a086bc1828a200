//! Light/dark theme preference

mod storage;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use storage::{FileStorage, MemoryStorage, StorageError, ThemeStorage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Canonical persisted value
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    /// Accepts the canonical values and the older `*-mode` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" | "light-mode" => Ok(Theme::Light),
            "dark" | "dark-mode" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Owns the applied theme and keeps the stored preference in sync
pub struct ThemeController {
    storage: Box<dyn ThemeStorage>,
    key: String,
    applied: Theme,
}

impl ThemeController {
    /// Read the stored preference, falling back to `default`
    pub fn load(storage: Box<dyn ThemeStorage>, key: &str, default: Theme) -> Self {
        let applied = match storage.get(key) {
            Some(value) => value.parse::<Theme>().unwrap_or_else(|e| {
                tracing::warn!("{}, using {}", e, default);
                default
            }),
            None => default,
        };
        tracing::debug!("Applied theme: {}", applied);

        Self {
            storage,
            key: key.to_string(),
            applied,
        }
    }

    /// The theme currently applied
    pub fn get(&self) -> Theme {
        self.applied
    }

    /// Persist and apply `theme`. A storage failure is logged; the theme
    /// is applied either way.
    pub fn set(&mut self, theme: Theme) -> Theme {
        if let Err(e) = self.storage.set(&self.key, theme.as_str()) {
            tracing::warn!("Failed to persist theme {}: {}", theme, e);
        }
        self.applied = theme;
        theme
    }

    /// Flip the applied theme
    pub fn toggle(&mut self) -> Theme {
        self.set(self.applied.toggled())
    }
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController")
            .field("key", &self.key)
            .field("applied", &self.applied)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Storage handle shared between the controller and the test
    struct Shared(Arc<MemoryStorage>);

    impl ThemeStorage for Shared {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set(key, value)
        }
    }

    #[test]
    fn test_default_when_absent() {
        let controller =
            ThemeController::load(Box::new(MemoryStorage::new()), "theme", Theme::Dark);
        assert_eq!(controller.get(), Theme::Dark);

        let controller =
            ThemeController::load(Box::new(MemoryStorage::new()), "theme", Theme::Light);
        assert_eq!(controller.get(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_and_applies() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("theme", "light").unwrap();

        let mut controller =
            ThemeController::load(Box::new(Shared(storage.clone())), "theme", Theme::Dark);
        assert_eq!(controller.get(), Theme::Light);

        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.get(), Theme::Dark);
        assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_legacy_values_are_normalised() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("theme", "light-mode").unwrap();

        let mut controller =
            ThemeController::load(Box::new(Shared(storage.clone())), "theme", Theme::Dark);
        assert_eq!(controller.get(), Theme::Light);

        controller.set(Theme::Light);
        assert_eq!(storage.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_garbage_value_uses_default() {
        let storage = MemoryStorage::new();
        storage.set("theme", "sepia").unwrap();
        let controller = ThemeController::load(Box::new(storage), "theme", Theme::Light);
        assert_eq!(controller.get(), Theme::Light);
    }

    #[test]
    fn test_parse() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" dark-mode ".parse::<Theme>(), Ok(Theme::Dark));
        assert!("blue".parse::<Theme>().is_err());
    }
}
