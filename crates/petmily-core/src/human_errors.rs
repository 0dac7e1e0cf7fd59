// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for pet owners.
//
// Every technical error is mapped to plain language with a clear suggestion.
// The severity drives how the booking screens present it.

use crate::error::PetmilyError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Storage blip; trying again usually works.
    Transient,
    /// The owner must change something in the booking form.
    ActionRequired,
    /// Cannot be fixed by retrying or editing the form.
    Permanent,
}

/// A human-readable error with a plain message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the owner should try (shown as body text).
    pub suggestion: String,
    /// Whether retrying the same action may succeed.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

impl HumanError {
    fn action(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    }

    fn transient(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable: true,
            severity: Severity::Transient,
        }
    }

    fn permanent(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable: false,
            severity: Severity::Permanent,
        }
    }
}

/// Convert a `PetmilyError` into a `HumanError` suitable for the booking screens.
pub fn humanize_error(err: &PetmilyError) -> HumanError {
    match err {
        // -- Pricing / discounts --
        PetmilyError::UnsupportedDuration(minutes) => HumanError::action(
            "That walk length isn't offered.",
            format!("Choose 30 minutes, 1 hour or 90 minutes instead of {minutes} minutes."),
        ),

        PetmilyError::InvalidDiscountTable(detail) => HumanError::permanent(
            "The discount settings are broken.",
            format!("Please report this problem. ({detail})"),
        ),

        PetmilyError::InvalidPriceTable(detail) => HumanError::permanent(
            "The price list is broken.",
            format!("Please report this problem. ({detail})"),
        ),

        PetmilyError::InvalidQuantity(_) => {
            HumanError::action("The quantity must be at least 1.", "Increase the quantity and try again.")
        }

        PetmilyError::UnknownCycle(value) => HumanError::action(
            "That delivery cycle isn't available.",
            format!("Pick one of 1주, 2주, 1개월, 2개월 or 3개월. (Got: {value})"),
        ),

        PetmilyError::UnknownDeliveryDay(value) => HumanError::action(
            "Deliveries can't be made on that day.",
            format!("Pick a day from Monday to Saturday. (Got: {value})"),
        ),

        // -- Booking wizard --
        PetmilyError::InsuranceNotAgreed => HumanError::action(
            "Please agree to the insurance terms.",
            "Walks are covered by the bundled insurance. Tick the agreement box on the payment step to continue.",
        ),

        PetmilyError::BookingClosed(_) => HumanError::permanent(
            "This booking is already confirmed.",
            "Start a new booking to book another walk.",
        ),

        PetmilyError::IncompleteStep { missing, .. } => HumanError::action(
            "Some required details are missing.",
            format!("Fill in: {missing}"),
        ),

        PetmilyError::NoSuchStep(_) => HumanError::permanent(
            "There's no page there.",
            "Use the step buttons to move through the booking.",
        ),

        PetmilyError::UnknownWalker(_) => HumanError::action(
            "That walker is no longer available.",
            "Choose another walker from the list.",
        ),

        PetmilyError::UnknownTemplate(_) => HumanError::action(
            "That caution item doesn't exist.",
            "Choose from the caution items shown on the settings step.",
        ),

        PetmilyError::UnknownPaymentMethod(value) => HumanError::action(
            "That payment method isn't supported.",
            format!("Pay by card, KakaoPay, NaverPay or Toss. (Got: {value})"),
        ),

        PetmilyError::UnknownWalkType(value) => HumanError::action(
            "That walk type isn't offered.",
            format!("Choose a single walk or a walking package. (Got: {value})"),
        ),

        PetmilyError::InvalidInput(detail) => HumanError::action(
            "Some of what you entered couldn't be understood.",
            format!("Check the value and try again. ({detail})"),
        ),

        // -- Storage --
        PetmilyError::Storage(_) => HumanError::transient(
            "Saved information couldn't be read or written.",
            "Try again. Your booking details are still on screen.",
        ),

        PetmilyError::Database(_) => HumanError::transient(
            "The booking history had a problem.",
            "Try closing and reopening the app. Confirmed bookings are kept on this device.",
        ),

        PetmilyError::IntegrityMismatch { .. } => HumanError::permanent(
            "A saved booking has been changed since it was confirmed.",
            "The stored copy doesn't match the original confirmation. Contact support with your booking number.",
        ),

        PetmilyError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError::action(
                    "The file couldn't be found.",
                    "It may have been moved or deleted. Check the path and try again.",
                )
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError::action(
                    "The app doesn't have permission to use that file.",
                    "Check the file permissions and try again.",
                )
            } else {
                HumanError::transient(
                    "There was a problem reading or writing a file.",
                    "Try again. If this keeps happening, your device's storage may be full.",
                )
            }
        }

        PetmilyError::Serialization(_) => HumanError::transient(
            "The app had an internal data problem.",
            "Try again. If this keeps happening, please report it.",
        ),

        // -- Platform --
        PetmilyError::PlatformUnavailable => HumanError::permanent(
            "This feature isn't available on your device.",
            "Some features require a phone or tablet.",
        ),
    }
}
