// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SHA-256 fingerprints for confirmed bookings.

use petmily_core::error::{PetmilyError, Result};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// `IntegrityMismatch` unless `data` hashes to `expected_hex`.
pub fn verify(data: &[u8], expected_hex: &str) -> Result<()> {
    let actual = fingerprint(data);
    if actual == expected_hex {
        Ok(())
    } else {
        Err(PetmilyError::IntegrityMismatch {
            expected: expected_hex.to_owned(),
            actual,
        })
    }
}
