// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wizard controller. Owns the draft, sequences the steps, finalizes.
//
// The controller is the single owner of the `BookingDraft`. Steps hand it
// `DraftUpdate`s; it merges them, keeps `pricing` fresh, and after
// `finalize` refuses any further change.

use chrono::{DateTime, Utc};
use petmily_core::config::AppConfig;
use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::BookingId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::draft::{BookingDraft, DraftUpdate};
use crate::integrity;
use crate::pricing::{Pricing, PricingEngine};
use crate::validation::{StepReport, StepValidator, WizardStep};

/// The immutable record produced when the wizard completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedBooking {
    id: BookingId,
    confirmed_at: DateTime<Utc>,
    draft: BookingDraft,
    pricing: Pricing,
}

impl ConfirmedBooking {
    pub fn id(&self) -> BookingId {
        self.id
    }

    pub fn confirmed_at(&self) -> DateTime<Utc> {
        self.confirmed_at
    }

    /// The draft as it stood at confirmation.
    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    /// Canonical JSON of the record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// SHA-256 of [`Self::to_json`].
    pub fn fingerprint(&self) -> Result<String> {
        Ok(integrity::fingerprint(self.to_json()?.as_bytes()))
    }
}

/// Receives the confirmed booking and takes the user elsewhere.
pub trait BookingNavigator {
    fn booking_confirmed(&mut self, booking: &ConfirmedBooking) -> Result<()>;
}

/// Sequences steps 1–5 over a single draft.
#[derive(Debug)]
pub struct WizardController {
    draft: BookingDraft,
    step: WizardStep,
    engine: PricingEngine,
    enforce_required_fields: bool,
    confirmed: Option<ConfirmedBooking>,
    delivered: bool,
}

impl WizardController {
    /// Fresh wizard on step 1 with the configured defaults, priced.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_draft(config, PricingEngine::standard(), BookingDraft::new(config))
    }

    /// Wizard seeded with an existing draft and a custom engine.
    pub fn with_draft(config: &AppConfig, engine: PricingEngine, draft: BookingDraft) -> Self {
        let mut wizard = Self {
            draft,
            step: WizardStep::BasicInfo,
            engine,
            enforce_required_fields: config.enforce_required_fields,
            confirmed: None,
            delivered: false,
        };
        wizard.reprice();
        wizard
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    /// True once `finalize` has succeeded.
    pub fn is_closed(&self) -> bool {
        self.confirmed.is_some()
    }

    /// The booking produced by `finalize`, if any.
    pub fn confirmed_booking(&self) -> Option<&ConfirmedBooking> {
        self.confirmed.as_ref()
    }

    /// The confirmed booking while no navigator has accepted it yet.
    pub fn undelivered_booking(&self) -> Option<&ConfirmedBooking> {
        if self.delivered {
            None
        } else {
            self.confirmed.as_ref()
        }
    }

    /// Record that the confirmed booking was handed over.
    pub fn mark_delivered(&mut self) {
        if self.confirmed.is_some() {
            self.delivered = true;
        }
    }

    fn ensure_open(&self) -> Result<()> {
        match &self.confirmed {
            Some(booking) => Err(PetmilyError::BookingClosed(booking.id.to_string())),
            None => Ok(()),
        }
    }

    fn reprice(&mut self) {
        match self
            .engine
            .compute_price(self.draft.duration_minutes, self.draft.walk_type)
        {
            Ok(pricing) => self.draft.pricing = Some(pricing),
            Err(e) => {
                warn!(error = %e, "draft cannot be priced");
                self.draft.pricing = None;
            }
        }
    }

    /// Merge a partial update into the draft. No validation happens here.
    pub fn update(&mut self, update: DraftUpdate) -> Result<()> {
        self.ensure_open()?;
        if update.is_empty() {
            return Ok(());
        }
        self.draft = self.draft.merged(&update);
        if update.touches_pricing() {
            self.reprice();
        }
        debug!(step = self.step.number(), "draft updated");
        Ok(())
    }

    /// Let a step compute its update from the current draft, then merge it.
    pub fn dispatch(&mut self, step_fn: impl FnOnce(&BookingDraft) -> DraftUpdate) -> Result<()> {
        let update = step_fn(&self.draft);
        self.update(update)
    }

    /// As [`Self::dispatch`] for step operations that can fail.
    pub fn try_dispatch(
        &mut self,
        step_fn: impl FnOnce(&BookingDraft) -> Result<DraftUpdate>,
    ) -> Result<()> {
        let update = step_fn(&self.draft)?;
        self.update(update)
    }

    pub fn validate_current(&self) -> StepReport {
        StepValidator::validate(self.step, &self.draft)
    }

    /// Move to the next step.
    ///
    /// With `enforce_required_fields` off this never checks the draft.
    #[instrument(skip(self), fields(from = self.step.number()))]
    pub fn advance(&mut self) -> Result<WizardStep> {
        self.ensure_open()?;
        if self.enforce_required_fields {
            self.validate_current().into_result()?;
        }
        let next = self
            .step
            .next()
            .ok_or(PetmilyError::NoSuchStep(self.step.number() + 1))?;
        self.step = next;
        info!(step = next.number(), title = next.title(), "advanced");
        Ok(next)
    }

    /// Return to the previous step. The draft is left as is.
    pub fn back(&mut self) -> Result<WizardStep> {
        self.ensure_open()?;
        let prev = self.step.prev().ok_or(PetmilyError::NoSuchStep(0))?;
        self.step = prev;
        debug!(step = prev.number(), "went back");
        Ok(prev)
    }

    /// Jump to `target`. Forward jumps check every skipped step when
    /// required fields are enforced.
    pub fn goto(&mut self, target: WizardStep) -> Result<WizardStep> {
        self.ensure_open()?;
        if self.enforce_required_fields && target > self.step {
            for report in StepValidator::validate_through(target, &self.draft) {
                if report.step >= self.step && report.step < target {
                    report.into_result()?;
                }
            }
        }
        self.step = target;
        debug!(step = target.number(), "jumped");
        Ok(target)
    }

    /// Freeze the draft into a `ConfirmedBooking`.
    ///
    /// Fails without insurance agreement or when the duration has no
    /// price. Other fields are not checked. On success the wizard is
    /// closed and rejects further updates.
    #[instrument(skip(self))]
    pub fn finalize(&mut self) -> Result<ConfirmedBooking> {
        self.ensure_open()?;
        if !self.draft.insurance_agreed {
            return Err(PetmilyError::InsuranceNotAgreed);
        }
        let pricing = self
            .engine
            .compute_price(self.draft.duration_minutes, self.draft.walk_type)?;
        self.draft.pricing = Some(pricing);

        let booking = ConfirmedBooking {
            id: BookingId::new(),
            confirmed_at: Utc::now(),
            draft: self.draft.clone(),
            pricing,
        };
        self.confirmed = Some(booking.clone());
        info!(
            booking_id = %booking.id,
            final_price = pricing.final_price,
            walk_type = booking.draft.walk_type.as_str(),
            "booking confirmed"
        );
        Ok(booking)
    }
}
