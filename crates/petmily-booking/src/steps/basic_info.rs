// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Step 1: walk type, duration, date, time, address.
//
// Every change produces an update immediately. Date and time are taken
// verbatim.

use petmily_core::types::WalkType;

use super::Step;
use crate::draft::DraftUpdate;
use crate::pricing::PricingEngine;
use crate::validation::WizardStep;

/// A selectable duration with its label and base price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationOption {
    pub minutes: u32,
    pub label: String,
    pub base_price: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInfoStep;

impl Step for BasicInfoStep {
    const STEP: WizardStep = WizardStep::BasicInfo;
}

impl BasicInfoStep {
    pub fn walk_type_options(&self) -> &'static [WalkType] {
        &WalkType::ALL
    }

    pub fn duration_options(&self, engine: &PricingEngine) -> Vec<DurationOption> {
        engine
            .duration_options()
            .into_iter()
            .map(|(minutes, label, base_price)| DurationOption {
                minutes,
                label,
                base_price,
            })
            .collect()
    }

    pub fn set_walk_type(&self, walk_type: WalkType) -> DraftUpdate {
        DraftUpdate::new().with_walk_type(walk_type)
    }

    /// Any value is accepted here; pricing reports unsupported durations.
    pub fn set_duration(&self, minutes: u32) -> DraftUpdate {
        DraftUpdate::new().with_duration(minutes)
    }

    pub fn set_date(&self, date: &str) -> DraftUpdate {
        DraftUpdate::new().with_date(date)
    }

    pub fn set_time(&self, time: &str) -> DraftUpdate {
        DraftUpdate::new().with_time(time)
    }

    pub fn set_address(&self, address: &str) -> DraftUpdate {
        DraftUpdate::new().with_address(address)
    }

    pub fn use_current_location(&self, enabled: bool) -> DraftUpdate {
        DraftUpdate::new().with_current_location(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::BookingDraft;

    #[test]
    fn duration_chips_follow_the_engine() {
        let options = BasicInfoStep.duration_options(&PricingEngine::standard());
        let minutes: Vec<u32> = options.iter().map(|o| o.minutes).collect();
        assert_eq!(minutes, vec![30, 60, 90]);
        assert_eq!(options[1].label, "1시간");
        assert_eq!(options[2].base_price, 35_000);
    }

    #[test]
    fn free_text_is_kept_verbatim() {
        let step = BasicInfoStep;
        let draft = BookingDraft::default()
            .merged(&step.set_date("다음 주 화요일?"))
            .merged(&step.set_time("25:99"));
        assert_eq!(draft.date, "다음 주 화요일?");
        assert_eq!(draft.time, "25:99");
        assert!(!step.can_proceed(&draft));

        let draft = draft.merged(&step.use_current_location(true));
        assert!(step.can_proceed(&draft));
    }

    #[test]
    fn each_setter_touches_one_field() {
        let update = BasicInfoStep.set_walk_type(WalkType::Package);
        assert_eq!(update.walk_type, Some(WalkType::Package));
        assert!(update.duration_minutes.is_none() && update.address.is_none());
    }
}
