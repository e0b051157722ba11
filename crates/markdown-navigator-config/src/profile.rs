//! Rendering profiles and the store that hands them to consumers.
//!
//! The store is an ordinary value passed to whoever needs it. Components that
//! must react to profile edits register a [`ProfileListener`] on the store
//! instead of being discovered through global state.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::options::ParserOptions;

/// A named bundle of dialect settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderingProfile {
    pub name: String,
    #[serde(default)]
    pub parser: ParserOptions,
}

impl RenderingProfile {
    pub fn new(name: impl Into<String>, parser: ParserOptions) -> Self {
        Self {
            name: name.into(),
            parser,
        }
    }
}

/// Notified whenever a profile in a [`ProfileStore`] is added or changed.
pub trait ProfileListener: Send + Sync {
    fn profile_changed(&self, profile: &RenderingProfile);
}

/// Holds every known rendering profile by name.
#[derive(Default)]
pub struct ProfileStore {
    profiles: BTreeMap<String, RenderingProfile>,
    listeners: Vec<Arc<dyn ProfileListener>>,
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore")
            .field("profiles", &self.profiles)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ProfileStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one profile per parser preset.
    pub fn with_presets() -> Self {
        let mut store = Self::new();
        for name in ParserOptions::PRESET_NAMES {
            if let Some(options) = ParserOptions::preset(name) {
                store
                    .profiles
                    .insert(name.to_string(), RenderingProfile::new(name, options));
            }
        }
        store
    }

    pub fn get(&self, name: &str) -> Option<&RenderingProfile> {
        self.profiles.get(name)
    }

    /// Parser options for a profile, or an error naming the missing profile.
    pub fn parser_options(&self, name: &str) -> Result<ParserOptions, ConfigError> {
        self.get(name)
            .map(|profile| profile.parser)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn register_listener(&mut self, listener: Arc<dyn ProfileListener>) {
        self.listeners.push(listener);
    }

    /// Insert or replace a profile and notify listeners.
    pub fn set_profile(&mut self, profile: RenderingProfile) {
        log::debug!("rendering profile '{}' updated", profile.name);
        for listener in &self.listeners {
            listener.profile_changed(&profile);
        }
        self.profiles.insert(profile.name.clone(), profile);
    }

    /// Edit the parser options of an existing profile in place.
    pub fn update_parser(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut ParserOptions),
    ) -> Result<(), ConfigError> {
        let mut profile = self
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))?;
        edit(&mut profile.parser);
        self.set_profile(profile);
        Ok(())
    }
}
