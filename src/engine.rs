//! Stateful profile engine.
//!
//! The dashboard recomputes the profile whenever the raw trail data changes
//! (a fresh network fetch, a cache-version bump). The engine models that
//! reactively-recomputed state explicitly: it owns the current track, the
//! derived profile and stats, and a dataset version tag, and rebuilds
//! everything synchronously on each load. Derivation is pure, so loading the
//! same track twice produces identical state.
//!
//! The pure functions in [`crate::profile`] and friends remain the primary
//! API; the engine is a convenience host for callers that want one shared,
//! lazily-initialized instance.

use std::sync::Mutex;

use log::info;
use once_cell::sync::Lazy;

use crate::error::Result;
use crate::profile::{build_profile, ProfileConfig, ProfilePoint};
use crate::stats::{compute_stats, ProfileStats};
use crate::TrailPoint;

/// Global engine instance, lazily initialized with default config.
pub static ENGINE: Lazy<Mutex<ProfileEngine>> = Lazy::new(|| Mutex::new(ProfileEngine::default()));

/// Run a closure with exclusive access to the global engine.
pub fn with_engine<F, R>(f: F) -> R
where
    F: FnOnce(&mut ProfileEngine) -> R,
{
    let mut engine = ENGINE.lock().expect("profile engine lock poisoned");
    f(&mut engine)
}

/// Owns the current track and its derived profile/stats.
pub struct ProfileEngine {
    config: ProfileConfig,
    track: Vec<TrailPoint>,
    dataset_version: Option<String>,
    profile: Vec<ProfilePoint>,
    stats: ProfileStats,
}

impl Default for ProfileEngine {
    fn default() -> Self {
        Self {
            config: ProfileConfig::default(),
            track: Vec::new(),
            dataset_version: None,
            profile: Vec::new(),
            stats: ProfileStats::default(),
        }
    }
}

impl ProfileEngine {
    /// Create an engine with a custom derivation config.
    pub fn new(config: ProfileConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Load a new track and recompute the profile and stats.
    ///
    /// The previous derived state is discarded wholesale; there is no
    /// incremental update path.
    pub fn load_track(&mut self, track: Vec<TrailPoint>, dataset_version: Option<String>) {
        self.track = track;
        self.dataset_version = dataset_version;
        self.recompute();

        info!(
            "[ProfileEngine] Loaded {} points (version {:?}): {:.1} mi, +{:.0}' / -{:.0}'",
            self.track.len(),
            self.dataset_version,
            self.stats.total_miles,
            self.stats.total_gain_ft,
            self.stats.total_loss_ft
        );
    }

    /// Replace the derivation config and recompute against the current track.
    pub fn set_config(&mut self, config: ProfileConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.recompute();
        Ok(())
    }

    /// Drop the track and all derived state.
    pub fn clear(&mut self) {
        self.track.clear();
        self.dataset_version = None;
        self.profile.clear();
        self.stats = ProfileStats::default();
        info!("[ProfileEngine] Cleared");
    }

    fn recompute(&mut self) {
        self.profile = build_profile(&self.track, &self.config);
        self.stats = compute_stats(&self.profile);
    }

    /// The derived profile for the current track.
    pub fn profile(&self) -> &[ProfilePoint] {
        &self.profile
    }

    /// Aggregate stats for the current track.
    pub fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    /// The currently loaded raw track.
    pub fn track(&self) -> &[TrailPoint] {
        &self.track
    }

    /// Version tag of the loaded dataset, if the loader provided one.
    pub fn dataset_version(&self) -> Option<&str> {
        self.dataset_version.as_deref()
    }

    /// The active derivation config.
    pub fn config(&self) -> &ProfileConfig {
        &self.config
    }

    /// Stats serialized for the dashboard's stat cards.
    pub fn stats_json(&self) -> String {
        serde_json::to_string(&self.stats).unwrap_or_else(|_| "{}".to_string())
    }

    /// Profile serialized for the charting layer.
    pub fn profile_json(&self) -> String {
        serde_json::to_string(&self.profile).unwrap_or_else(|_| "[]".to_string())
    }
}
