// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer. Opens device storage and the booking history and
// hands out the pieces a booking session needs.

use std::path::{Path, PathBuf};

use petmily_booking::{
    BookingHistory, BookingNavigator, ConfirmedBooking, PetProfileStore, PricingEngine,
    SubscriptionPlanner, WizardController,
};
use petmily_bridge::{PlatformBridge, StubBridge, platform_bridge};
use petmily_core::AppConfig;
use petmily_core::error::Result;
use tracing::{info, warn};

use super::data_dir;

pub struct AppServices {
    bridge: Box<dyn PlatformBridge>,
    history: Option<BookingHistory>,
    config: AppConfig,
}

impl AppServices {
    /// Initialise all services. Call once at startup.
    pub fn init() -> Result<Self> {
        Self::open(data_dir::data_dir())
    }

    /// Services rooted at `dir`: config from `config.json` (written with
    /// defaults on first run), device storage in `storage.json`, history in
    /// `bookings.db`.
    pub fn open(dir: PathBuf) -> Result<Self> {
        info!(path = %dir.display(), "initialising app services");
        let config = match load_config(&dir) {
            Some(config) => config,
            None => {
                let config = AppConfig::default();
                if !dir.join(CONFIG_FILE).exists() {
                    persist_config(&dir, &config)?;
                }
                config
            }
        };
        let history = if config.history_enabled {
            Some(BookingHistory::open(dir.join(HISTORY_FILE))?)
        } else {
            None
        };
        Ok(Self {
            bridge: platform_bridge(&dir),
            history,
            config,
        })
    }

    /// Everything in memory. Used when the data directory is unusable.
    pub fn fallback() -> Result<Self> {
        warn!("using in-memory storage, nothing will be kept");
        Ok(Self {
            bridge: Box::new(StubBridge::new()),
            history: Some(BookingHistory::open_in_memory()?),
            config: AppConfig::default(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn platform_name(&self) -> &str {
        self.bridge.platform_name()
    }

    pub fn profiles(&self) -> PetProfileStore<'_, dyn PlatformBridge> {
        PetProfileStore::new(self.bridge.as_ref(), self.config.pet_profile_key.clone())
    }

    pub fn pricing(&self) -> PricingEngine {
        PricingEngine::standard()
    }

    pub fn planner(&self) -> SubscriptionPlanner {
        SubscriptionPlanner::standard()
    }

    /// A fresh wizard with the configured defaults.
    pub fn start_booking(&self) -> WizardController {
        WizardController::new(&self.config)
    }

    pub fn history(&self) -> Option<&BookingHistory> {
        self.history.as_ref()
    }

    /// Navigation target for a completed wizard.
    pub fn navigator(&self) -> HistoryNavigator<'_> {
        HistoryNavigator {
            history: self.history.as_ref(),
            last_fingerprint: None,
        }
    }
}

/// Records confirmed bookings in the history, when one is kept.
pub struct HistoryNavigator<'a> {
    history: Option<&'a BookingHistory>,
    last_fingerprint: Option<String>,
}

impl HistoryNavigator<'_> {
    /// Fingerprint of the last booking recorded through this navigator.
    pub fn last_fingerprint(&self) -> Option<&str> {
        self.last_fingerprint.as_deref()
    }
}

impl BookingNavigator for HistoryNavigator<'_> {
    fn booking_confirmed(&mut self, booking: &ConfirmedBooking) -> Result<()> {
        match self.history {
            Some(history) => {
                self.last_fingerprint = Some(history.record(booking)?);
            }
            None => info!(booking_id = %booking.id(), "history disabled, booking not kept"),
        }
        Ok(())
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";
const HISTORY_FILE: &str = "bookings.db";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "config.json unreadable, using defaults");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use petmily_booking::DraftUpdate;

    #[test]
    fn config_round_trips_through_the_data_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let services = AppServices::open(dir.path().to_path_buf()).expect("open");
        assert_eq!(services.config(), &AppConfig::default());
        assert!(dir.path().join(CONFIG_FILE).exists());

        let config = AppConfig {
            default_duration_minutes: 90,
            ..AppConfig::default()
        };
        persist_config(dir.path(), &config).expect("write config");

        let reopened = AppServices::open(dir.path().to_path_buf()).expect("reopen");
        assert_eq!(reopened.config(), &config);
        assert_eq!(reopened.start_booking().draft().duration_minutes, 90);
    }

    #[test]
    fn disabled_history_keeps_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig {
            history_enabled: false,
            ..AppConfig::default()
        };
        persist_config(dir.path(), &config).expect("write config");
        let services = AppServices::open(dir.path().to_path_buf()).expect("open");
        assert!(services.history().is_none());

        let mut wizard = services.start_booking();
        wizard
            .update(DraftUpdate::new().with_insurance_agreed(true))
            .expect("update");
        let booking = wizard.finalize().expect("finalize");
        let mut nav = services.navigator();
        nav.booking_confirmed(&booking).expect("navigate");
        assert!(nav.last_fingerprint().is_none());
    }

    #[test]
    fn pet_profile_is_stored_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let services = AppServices::open(dir.path().to_path_buf()).expect("open");
            let pet = petmily_core::types::PetInfo {
                name: "쿠키".into(),
                ..Default::default()
            };
            services.profiles().save(&pet).expect("save");
        }
        let services = AppServices::open(dir.path().to_path_buf()).expect("reopen");
        assert_eq!(services.profiles().load().name, "쿠키");
        assert_eq!(services.platform_name(), "Desktop");
    }
}
