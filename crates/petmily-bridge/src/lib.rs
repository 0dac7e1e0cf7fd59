// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Petmily — platform bridge abstractions.
//
// The booking flow only needs one native capability: the device key-value
// store where the pet profile is saved. `NativeStorage` models it as
// string keys and string (JSON) values.

pub mod file_store;
pub mod stub;
pub mod traits;

use std::path::Path;

pub use file_store::FileStorage;
pub use stub::StubBridge;
pub use traits::{NativeStorage, PlatformBridge};

/// Bridge backed by a JSON file in the app's data directory.
pub struct DesktopBridge {
    storage: FileStorage,
}

impl DesktopBridge {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            storage: FileStorage::new(data_dir.join("storage.json")),
        }
    }
}

impl NativeStorage for DesktopBridge {
    fn get_item(&self, key: &str) -> petmily_core::error::Result<Option<String>> {
        self.storage.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> petmily_core::error::Result<()> {
        self.storage.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> petmily_core::error::Result<()> {
        self.storage.remove_item(key)
    }
}

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

/// Bridge for the current platform, persisting under `data_dir`.
pub fn platform_bridge(data_dir: &Path) -> Box<dyn PlatformBridge> {
    Box::new(DesktopBridge::new(data_dir))
}
