// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Step 5: read-only summary and completion.

use petmily_core::error::Result;
use petmily_core::types::caution_template;
use serde::Serialize;
use tracing::info;

use super::Step;
use crate::draft::BookingDraft;
use crate::pricing::format_won;
use crate::validation::WizardStep;
use crate::wizard::{BookingNavigator, ConfirmedBooking, WizardController};

/// What the confirmation screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub schedule: String,
    /// e.g. "정기 산책 패키지 • 60분".
    pub walk: String,
    pub location: String,
    pub walker: Option<String>,
    pub pet: Option<String>,
    pub cautions: Vec<String>,
    pub payment_method: String,
    /// `None` while the draft cannot be priced.
    pub total: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConfirmationStep;

impl Step for ConfirmationStep {
    const STEP: WizardStep = WizardStep::Confirmation;
}

impl ConfirmationStep {
    pub fn summary(&self, draft: &BookingDraft) -> BookingSummary {
        let pet = &draft.pet_info;
        BookingSummary {
            schedule: format!("{} {}", draft.date, draft.time).trim().to_string(),
            walk: format!("{} • {}분", draft.walk_type.label(), draft.duration_minutes),
            location: draft.location_label().to_string(),
            walker: draft
                .selected_walker
                .as_ref()
                .map(|w| format!("{} ({}, ★{:.1})", w.name, w.distance, w.rating)),
            pet: if pet.name.trim().is_empty() {
                None
            } else if pet.breed.trim().is_empty() {
                Some(pet.name.clone())
            } else {
                Some(format!("{} ({})", pet.name, pet.breed))
            },
            cautions: draft
                .caution_templates
                .iter()
                .filter_map(|id| caution_template(id))
                .map(|t| t.title.to_string())
                .collect(),
            payment_method: draft.payment_method.label().to_string(),
            total: draft.pricing.map(|p| format_won(p.final_price)),
        }
    }

    /// Finalize the wizard and hand the booking to the navigator.
    ///
    /// If the navigator fails, the booking stays on the wizard and the
    /// next call hands over the same booking instead of finalizing again.
    pub fn complete(
        &self,
        wizard: &mut WizardController,
        navigator: &mut dyn BookingNavigator,
    ) -> Result<ConfirmedBooking> {
        let booking = match wizard.undelivered_booking() {
            Some(pending) => pending.clone(),
            None => wizard.finalize()?,
        };
        navigator.booking_confirmed(&booking)?;
        wizard.mark_delivered();
        info!(booking_id = %booking.id(), "booking handed to navigation");
        Ok(booking)
    }
}
