// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.

use petmily_core::error::Result;

/// Unified bridge that groups the native capabilities the app relies on.
pub trait PlatformBridge: NativeStorage {
    /// Human-readable platform name (e.g. "iOS 17", "Android 14").
    fn platform_name(&self) -> &str;
}

/// Device key-value storage (AsyncStorage / SharedPreferences / UserDefaults).
///
/// Values are opaque strings; callers store JSON.
pub trait NativeStorage {
    /// Read the value stored under `key`. Returns None if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
