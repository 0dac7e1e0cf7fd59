// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Step controllers.
//
// A step reads the current draft and returns a `DraftUpdate` for the
// wizard controller to merge. Steps differ only in which fields they
// edit; their requirements come from the shared step schema.

pub mod basic_info;
pub mod confirmation;
pub mod payment;
pub mod walk_settings;
pub mod walker_selection;

pub use basic_info::BasicInfoStep;
pub use confirmation::{BookingSummary, ConfirmationStep};
pub use payment::PaymentStep;
pub use walk_settings::WalkSettingsStep;
pub use walker_selection::WalkerSelectionStep;

use crate::draft::BookingDraft;
use crate::validation::{StepReport, StepSchema, StepValidator, WizardStep};

/// Common surface of the five step controllers.
pub trait Step {
    const STEP: WizardStep;

    fn schema(&self) -> &'static StepSchema {
        Self::STEP.schema()
    }

    fn report(&self, draft: &BookingDraft) -> StepReport {
        StepValidator::validate(Self::STEP, draft)
    }

    /// Whether the "next" action would be enabled for this draft.
    fn can_proceed(&self, draft: &BookingDraft) -> bool {
        self.report(draft).is_complete()
    }
}
