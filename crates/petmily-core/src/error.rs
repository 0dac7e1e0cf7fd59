// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Petmily.

use thiserror::Error;

/// Top-level error type for all Petmily operations.
#[derive(Debug, Error)]
pub enum PetmilyError {
    // -- Pricing / discounts --
    #[error("unsupported walk duration: {0} minutes")]
    UnsupportedDuration(u32),

    #[error("invalid discount table: {0}")]
    InvalidDiscountTable(String),

    #[error("invalid price table: {0}")]
    InvalidPriceTable(String),

    #[error("subscription quantity must be at least 1, got {0}")]
    InvalidQuantity(u32),

    #[error("unknown subscription cycle: {0}")]
    UnknownCycle(String),

    #[error("unknown delivery day: {0}")]
    UnknownDeliveryDay(String),

    // -- Booking wizard --
    #[error("insurance terms must be agreed before the booking can be confirmed")]
    InsuranceNotAgreed,

    #[error("booking {0} is already confirmed")]
    BookingClosed(String),

    #[error("step {step} is incomplete: missing {missing}")]
    IncompleteStep { step: u8, missing: String },

    #[error("no step {0} in the booking wizard")]
    NoSuchStep(u8),

    #[error("unknown walker: {0}")]
    UnknownWalker(String),

    #[error("unknown caution template: {0}")]
    UnknownTemplate(String),

    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("unknown walk type: {0}")]
    UnknownWalkType(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // -- Storage / persistence --
    #[error("local storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PetmilyError>;
