// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Step 3: pet details, caution templates, notes, emergency contact,
// notification switches.

use petmily_bridge::NativeStorage;
use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::{CAUTION_TEMPLATES, CautionTemplate, NotificationKind, PetField, caution_template};
use tracing::debug;

use super::Step;
use crate::draft::{BookingDraft, DraftUpdate, toggle_template};
use crate::profile::PetProfileStore;
use crate::validation::WizardStep;

#[derive(Debug, Clone, Copy, Default)]
pub struct WalkSettingsStep;

impl Step for WalkSettingsStep {
    const STEP: WizardStep = WizardStep::WalkSettings;
}

impl WalkSettingsStep {
    pub fn templates(&self) -> &'static [CautionTemplate] {
        &CAUTION_TEMPLATES
    }

    /// Pre-fill the pet details from the saved profile.
    ///
    /// A draft that already carries pet details (the owner came back to
    /// this step) is left alone, as is a blank saved profile.
    pub fn mount<S: NativeStorage + ?Sized>(
        &self,
        profiles: &PetProfileStore<'_, S>,
        draft: &BookingDraft,
    ) -> DraftUpdate {
        if !draft.pet_info.is_blank() {
            return DraftUpdate::new();
        }
        let saved = profiles.load();
        if saved.is_blank() {
            return DraftUpdate::new();
        }
        debug!("pet details pre-filled from saved profile");
        DraftUpdate::new().with_pet_info(saved)
    }

    pub fn update_pet_field(&self, draft: &BookingDraft, field: PetField, value: &str) -> DraftUpdate {
        let mut pet = draft.pet_info.clone();
        pet.set(field, value);
        DraftUpdate::new().with_pet_info(pet)
    }

    /// Add the template if absent, remove it if present.
    pub fn toggle_template(&self, draft: &BookingDraft, id: &str) -> Result<DraftUpdate> {
        if caution_template(id).is_none() {
            return Err(PetmilyError::UnknownTemplate(id.to_string()));
        }
        Ok(DraftUpdate::new().with_caution_templates(toggle_template(&draft.caution_templates, id)))
    }

    pub fn set_custom_notes(&self, notes: &str) -> DraftUpdate {
        DraftUpdate::new().with_custom_notes(notes)
    }

    pub fn set_emergency_contact(&self, phone: &str) -> DraftUpdate {
        DraftUpdate::new().with_emergency_contact(phone)
    }

    pub fn toggle_notification(&self, draft: &BookingDraft, kind: NotificationKind) -> DraftUpdate {
        DraftUpdate::new().with_notifications(draft.notifications.toggled(kind))
    }

    /// Write the draft's pet details back as the saved profile.
    pub fn save_pet_profile<S: NativeStorage + ?Sized>(
        &self,
        profiles: &PetProfileStore<'_, S>,
        draft: &BookingDraft,
    ) -> Result<()> {
        profiles.save(&draft.pet_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petmily_bridge::StubBridge;
    use petmily_core::types::PetInfo;

    const PROFILE: &str = r#"{"name":"몽이","breed":"비숑","age":"5","weight":"6kg"}"#;

    #[test]
    fn mount_prefills_from_saved_profile() {
        let bridge = StubBridge::new().with_item("petInfo", PROFILE);
        let profiles = PetProfileStore::new(&bridge, "petInfo");
        let draft = BookingDraft::default().merged(&WalkSettingsStep.mount(&profiles, &BookingDraft::default()));
        assert_eq!(draft.pet_info.name, "몽이");
        assert_eq!(draft.pet_info.weight, "6kg");
        assert!(WalkSettingsStep.can_proceed(&draft));
    }

    #[test]
    fn mount_keeps_details_already_in_the_draft() {
        let bridge = StubBridge::new().with_item("petInfo", PROFILE);
        let profiles = PetProfileStore::new(&bridge, "petInfo");
        let draft = BookingDraft::default().merged(&DraftUpdate::new().with_pet_info(PetInfo {
            name: "별이".into(),
            ..PetInfo::default()
        }));
        assert!(WalkSettingsStep.mount(&profiles, &draft).is_empty());
    }

    #[test]
    fn mount_survives_a_broken_profile() {
        let bridge = StubBridge::new().with_item("petInfo", "[]");
        let profiles = PetProfileStore::new(&bridge, "petInfo");
        assert!(WalkSettingsStep.mount(&profiles, &BookingDraft::default()).is_empty());
    }

    #[test]
    fn template_toggle_is_idempotent_in_pairs() {
        let step = WalkSettingsStep;
        let start = BookingDraft::default();
        let once = start.merged(&step.toggle_template(&start, "leash").expect("toggle"));
        assert!(once.caution_templates.contains("leash"));
        let twice = once.merged(&step.toggle_template(&once, "leash").expect("toggle"));
        assert_eq!(twice.caution_templates, start.caution_templates);
        assert!(matches!(
            step.toggle_template(&start, "fireworks"),
            Err(PetmilyError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn pet_field_edit_keeps_the_rest() {
        let step = WalkSettingsStep;
        let draft = BookingDraft::default().merged(&step.update_pet_field(&BookingDraft::default(), PetField::Name, "루이"));
        let draft = draft.merged(&step.update_pet_field(&draft, PetField::Breed, "웰시코기"));
        assert_eq!(draft.pet_info.name, "루이");
        assert_eq!(draft.pet_info.breed, "웰시코기");
    }

    #[test]
    fn notification_toggle_flips_one_switch() {
        let draft = BookingDraft::default();
        let draft = draft.merged(&WalkSettingsStep.toggle_notification(&draft, NotificationKind::Delay));
        assert!(!draft.notifications.delay);
        assert!(draft.notifications.departure && draft.notifications.completion);
    }

    #[test]
    fn saved_profile_round_trips_through_storage() {
        let bridge = StubBridge::new();
        let profiles = PetProfileStore::new(&bridge, "petInfo");
        let draft = BookingDraft::default().merged(&WalkSettingsStep.update_pet_field(
            &BookingDraft::default(),
            PetField::MedicalInfo,
            "심장사상충 약 복용 중",
        ));
        WalkSettingsStep.save_pet_profile(&profiles, &draft).expect("save");
        assert_eq!(profiles.load().medical_info, "심장사상충 약 복용 중");
    }
}
