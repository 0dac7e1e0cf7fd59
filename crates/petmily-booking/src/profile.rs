// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Saved pet profile in the device key-value store.

use petmily_bridge::NativeStorage;
use petmily_core::error::Result;
use petmily_core::types::PetInfo;
use tracing::{debug, info, instrument, warn};

/// Reads and writes the pet profile stored under one key.
pub struct PetProfileStore<'a, S: NativeStorage + ?Sized> {
    storage: &'a S,
    key: String,
}

impl<'a, S: NativeStorage + ?Sized> PetProfileStore<'a, S> {
    pub fn new(storage: &'a S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored profile, or a blank one.
    ///
    /// A missing key, a storage failure, and unparsable JSON all yield
    /// `PetInfo::default()`. Nothing is surfaced to the caller.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> PetInfo {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("no saved pet profile");
                return PetInfo::default();
            }
            Err(e) => {
                warn!(error = %e, "pet profile read failed, using blank profile");
                return PetInfo::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(info) => info,
            Err(e) => {
                warn!(error = %e, "pet profile is not valid JSON, using blank profile");
                PetInfo::default()
            }
        }
    }

    #[instrument(skip(self, pet), fields(key = %self.key))]
    pub fn save(&self, pet: &PetInfo) -> Result<()> {
        let json = serde_json::to_string(pet)?;
        self.storage.set_item(&self.key, &json)?;
        info!("pet profile saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petmily_bridge::StubBridge;

    #[test]
    fn missing_profile_is_blank() {
        let bridge = StubBridge::new();
        let store = PetProfileStore::new(&bridge, "petInfo");
        assert!(store.load().is_blank());
    }

    #[test]
    fn corrupt_profile_is_blank() {
        let bridge = StubBridge::new().with_item("petInfo", "{not json");
        let store = PetProfileStore::new(&bridge, "petInfo");
        assert_eq!(store.load(), PetInfo::default());
    }

    #[test]
    fn reads_camel_case_profile() {
        let bridge = StubBridge::new().with_item(
            "petInfo",
            r#"{"name":"콩이","breed":"말티즈","age":"3","medicalInfo":"슬개골 주의"}"#,
        );
        let info = PetProfileStore::new(&bridge, "petInfo").load();
        assert_eq!(info.name, "콩이");
        assert_eq!(info.medical_info, "슬개골 주의");
        assert_eq!(info.weight, "");
    }

    #[test]
    fn save_then_load() {
        let bridge = StubBridge::new();
        let store = PetProfileStore::new(&bridge, "petInfo");
        let info = PetInfo {
            name: "두부".into(),
            breed: "시바".into(),
            temperament: "활발함".into(),
            ..PetInfo::default()
        };
        store.save(&info).expect("save");
        assert_eq!(store.load(), info);

        store.clear().expect("clear");
        assert!(store.load().is_blank());
    }
}
