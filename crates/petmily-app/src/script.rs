// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Booking scripts: a JSON description of what the owner enters on each
// step, replayed through the wizard from step 1 to confirmation.

use std::path::Path;

use petmily_booking::steps::{
    BasicInfoStep, BookingSummary, ConfirmationStep, PaymentStep, WalkSettingsStep,
    WalkerSelectionStep,
};
use petmily_booking::{ConfirmedBooking, WizardController};
use petmily_core::error::Result;
use petmily_core::types::{
    NotificationKind, NotificationSettings, PaymentMethod, PetField, PetInfo, WalkType, Walker,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::services::app_services::AppServices;

/// Step 1 inputs. Unset fields keep the configured defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BasicInfoInput {
    pub walk_type: Option<WalkType>,
    pub duration: Option<u32>,
    pub date: String,
    pub time: String,
    pub address: String,
    pub use_current_location: bool,
}

/// What the owner does on each step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingScript {
    /// Candidate walkers. Empty means the built-in demo list.
    pub walkers: Vec<Walker>,
    pub basic_info: BasicInfoInput,
    /// Id of the walker to pick.
    pub walker: Option<String>,
    /// Pick the walker through the detail view instead of the list.
    pub select_from_detail: bool,
    /// Pet fields typed over the saved profile. Blank fields are skipped.
    pub pet: PetInfo,
    pub save_pet_profile: bool,
    pub caution_templates: Vec<String>,
    pub custom_notes: String,
    pub emergency_contact: String,
    pub notifications: Option<NotificationSettings>,
    pub payment_method: Option<PaymentMethod>,
    pub insurance_agreed: bool,
}

impl BookingScript {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Outcome of a replayed script.
pub struct ScriptOutcome {
    pub booking: ConfirmedBooking,
    pub summary: BookingSummary,
    pub fingerprint: Option<String>,
}

/// Replay `script` through all five steps and complete the booking.
pub fn run(services: &AppServices, script: &BookingScript) -> Result<ScriptOutcome> {
    let mut wizard = services.start_booking();
    info!(platform = services.platform_name(), "booking script started");

    basic_info(&mut wizard, &script.basic_info)?;
    wizard.advance()?;

    walker_selection(&mut wizard, script)?;
    wizard.advance()?;

    walk_settings(&mut wizard, services, script)?;
    wizard.advance()?;

    let payment = PaymentStep::new(services.pricing());
    if let Some(method) = script.payment_method {
        wizard.update(payment.select_payment_method(method))?;
    }
    wizard.update(payment.set_insurance_agreed(script.insurance_agreed))?;
    wizard.advance()?;

    let confirmation = ConfirmationStep;
    let summary = confirmation.summary(wizard.draft());
    let mut navigator = services.navigator();
    let booking = confirmation.complete(&mut wizard, &mut navigator)?;
    Ok(ScriptOutcome {
        booking,
        summary,
        fingerprint: navigator.last_fingerprint().map(str::to_string),
    })
}

fn basic_info(wizard: &mut WizardController, input: &BasicInfoInput) -> Result<()> {
    let step = BasicInfoStep;
    if let Some(walk_type) = input.walk_type {
        wizard.update(step.set_walk_type(walk_type))?;
    }
    if let Some(minutes) = input.duration {
        wizard.update(step.set_duration(minutes))?;
    }
    wizard.update(step.set_date(&input.date))?;
    wizard.update(step.set_time(&input.time))?;
    wizard.update(step.set_address(&input.address))?;
    wizard.update(step.use_current_location(input.use_current_location))
}

fn walker_selection(wizard: &mut WizardController, script: &BookingScript) -> Result<()> {
    let candidates = if script.walkers.is_empty() {
        demo_walkers()
    } else {
        script.walkers.clone()
    };
    let mut step = WalkerSelectionStep::new(candidates);
    let Some(id) = script.walker.as_deref() else {
        debug!("no walker chosen");
        return Ok(());
    };
    if script.select_from_detail {
        step.open_detail(id)?;
        if let Some(update) = step.select_from_detail() {
            wizard.update(update)?;
        }
        Ok(())
    } else {
        wizard.try_dispatch(|_| step.select_by_id(id))
    }
}

fn walk_settings(wizard: &mut WizardController, services: &AppServices, script: &BookingScript) -> Result<()> {
    let step = WalkSettingsStep;
    let profiles = services.profiles();
    wizard.dispatch(|draft| step.mount(&profiles, draft))?;

    let typed = [
        (PetField::Name, &script.pet.name),
        (PetField::Breed, &script.pet.breed),
        (PetField::Age, &script.pet.age),
        (PetField::Weight, &script.pet.weight),
        (PetField::Temperament, &script.pet.temperament),
        (PetField::MedicalInfo, &script.pet.medical_info),
    ];
    for (field, value) in typed {
        if !value.trim().is_empty() {
            wizard.dispatch(|draft| step.update_pet_field(draft, field, value))?;
        }
    }
    if script.save_pet_profile {
        step.save_pet_profile(&profiles, wizard.draft())?;
    }

    for id in &script.caution_templates {
        wizard.try_dispatch(|draft| step.toggle_template(draft, id))?;
    }
    wizard.update(step.set_custom_notes(&script.custom_notes))?;
    wizard.update(step.set_emergency_contact(&script.emergency_contact))?;

    if let Some(wanted) = script.notifications {
        for kind in [NotificationKind::Departure, NotificationKind::Delay, NotificationKind::Completion] {
            if wizard.draft().notifications.is_enabled(kind) != wanted.is_enabled(kind) {
                wizard.dispatch(|draft| step.toggle_notification(draft, kind))?;
            }
        }
    }
    Ok(())
}

/// Demo candidates used when a script brings no walker list.
pub fn demo_walkers() -> Vec<Walker> {
    let walker = |id: &str, name: &str, distance: &str, rating: f32, reviews: u32, years: u32, intro: &str| Walker {
        id: id.to_string(),
        name: name.to_string(),
        distance: distance.to_string(),
        rating,
        review_count: reviews,
        experience: format!("{years}년 경험"),
        introduction: intro.to_string(),
        available_times: vec!["09:00".into(), "14:00".into(), "18:00".into()],
        reviews: Vec::new(),
    };
    vec![
        walker("2", "이준호 워커", "0.8km", 4.6, 89, 2, "대형견 산책 경험이 많습니다."),
        walker("1", "김민지 워커", "0.5km", 4.8, 127, 3, "반려견과 교감하는 산책을 좋아합니다."),
        walker("3", "박서연 워커", "1.2km", 4.9, 203, 5, "수의테크니션 자격을 보유하고 있습니다."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use petmily_core::error::PetmilyError;

    fn services() -> AppServices {
        AppServices::fallback().expect("fallback services")
    }

    fn script(json: &str) -> BookingScript {
        serde_json::from_str(json).expect("script")
    }

    #[test]
    fn full_package_booking() {
        let services = services();
        let outcome = run(
            &services,
            &script(
                r#"{
                    "basicInfo": {"walkType": "package", "duration": 60, "date": "2026-10-20",
                                  "time": "14:00", "address": "서울시 강남구 역삼동"},
                    "walker": "3",
                    "pet": {"name": "초코", "breed": "푸들"},
                    "cautionTemplates": ["leash", "door_lock", "leash"],
                    "paymentMethod": "kakao",
                    "insuranceAgreed": true
                }"#,
            ),
        )
        .expect("run");

        let pricing = outcome.booking.pricing();
        assert_eq!((pricing.base_price, pricing.discount_amount, pricing.final_price), (25_000, 2_500, 22_500));
        let draft = outcome.booking.draft();
        assert_eq!(draft.selected_walker.as_ref().map(|w| w.name.as_str()), Some("박서연 워커"));
        assert_eq!(draft.caution_templates.len(), 1);
        assert_eq!(draft.payment_method, PaymentMethod::Kakao);
        assert_eq!(outcome.summary.location, "서울시 강남구 역삼동");
        assert!(outcome.fingerprint.is_some());

        let history = services.history().expect("history");
        assert_eq!(history.all().expect("all").len(), 1);
    }

    #[test]
    fn script_without_insurance_is_refused() {
        let err = run(&services(), &script(r#"{"basicInfo": {"duration": 30}}"#))
            .err()
            .expect("refused");
        assert!(matches!(err, PetmilyError::InsuranceNotAgreed));
    }

    #[test]
    fn unknown_duration_is_refused_at_confirmation() {
        let err = run(
            &services(),
            &script(r#"{"basicInfo": {"duration": 45}, "insuranceAgreed": true}"#),
        )
        .err()
        .expect("refused");
        assert!(matches!(err, PetmilyError::UnsupportedDuration(45)));
    }

    #[test]
    fn saved_profile_fills_pet_details() {
        let services = services();
        services
            .profiles()
            .save(&PetInfo {
                name: "보리".into(),
                breed: "진돗개".into(),
                ..PetInfo::default()
            })
            .expect("save");
        let outcome = run(
            &services,
            &script(r#"{"walker": "1", "selectFromDetail": true, "pet": {"age": "4"}, "insuranceAgreed": true, "notifications": {"departure": true, "delay": false, "completion": true}}"#),
        )
        .expect("run");
        let draft = outcome.booking.draft();
        assert_eq!(draft.pet_info.name, "보리");
        assert_eq!(draft.pet_info.age, "4");
        assert!(!draft.notifications.delay);
        assert_eq!(outcome.summary.location, "현재 위치");
        assert_eq!(draft.selected_walker.as_ref().map(|w| w.id.as_str()), Some("1"));
    }

    #[test]
    fn demo_walkers_sort_nearest_first() {
        let step = WalkerSelectionStep::new(demo_walkers());
        let ids: Vec<&str> = step.candidates().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }
}
