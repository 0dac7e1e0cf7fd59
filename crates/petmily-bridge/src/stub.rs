// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory bridge for tests and CI builds where no device store exists.

use std::collections::HashMap;
use std::sync::Mutex;

use petmily_core::error::{PetmilyError, Result};

use crate::traits::*;

/// Bridge whose storage lives only as long as the value.
#[derive(Default)]
pub struct StubBridge {
    items: Mutex<HashMap<String, String>>,
}

impl StubBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key, e.g. a saved pet profile.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeStorage for StubBridge {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self
            .items
            .lock()
            .map_err(|e| PetmilyError::Storage(format!("stub store poisoned: {e}")))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        tracing::debug!(key, "stub store write");
        let mut items = self
            .items
            .lock()
            .map_err(|e| PetmilyError::Storage(format!("stub store poisoned: {e}")))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|e| PetmilyError::Storage(format!("stub store poisoned: {e}")))?;
        items.remove(key);
        Ok(())
    }
}
