// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The booking draft and the partial updates that steps produce.
//
// Steps never mutate the draft. They read it and return a `DraftUpdate`;
// the wizard controller is the only place an update is merged.

use std::collections::BTreeSet;

use petmily_core::config::AppConfig;
use petmily_core::types::{NotificationSettings, PaymentMethod, PetInfo, WalkType, Walker};
use serde::{Deserialize, Serialize};

use crate::pricing::Pricing;

/// The in-progress booking accumulated across the wizard steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    pub walk_type: WalkType,
    #[serde(rename = "duration")]
    pub duration_minutes: u32,
    /// Free text, never parsed.
    pub date: String,
    /// Free text, never parsed.
    pub time: String,
    pub address: String,
    /// The device location stands in for `address`.
    pub use_current_location: bool,
    pub selected_walker: Option<Walker>,
    pub pet_info: PetInfo,
    /// Ids from the caution-template catalog.
    pub caution_templates: BTreeSet<String>,
    pub custom_notes: String,
    pub emergency_contact: String,
    pub notifications: NotificationSettings,
    pub payment_method: PaymentMethod,
    pub insurance_agreed: bool,
    /// Derived by the controller. `None` while the duration has no price.
    pub pricing: Option<Pricing>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl BookingDraft {
    /// Empty draft with the configured preselections.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            walk_type: config.default_walk_type,
            duration_minutes: config.default_duration_minutes,
            date: String::new(),
            time: String::new(),
            address: String::new(),
            use_current_location: false,
            selected_walker: None,
            pet_info: PetInfo::default(),
            caution_templates: BTreeSet::new(),
            custom_notes: String::new(),
            emergency_contact: String::new(),
            notifications: NotificationSettings::default(),
            payment_method: config.default_payment_method,
            insurance_agreed: false,
            pricing: None,
        }
    }

    /// Apply `update` to a copy of this draft. Fields the update leaves
    /// unset keep their current values. `pricing` is never touched here.
    pub fn merged(&self, update: &DraftUpdate) -> BookingDraft {
        let mut next = self.clone();
        if let Some(v) = update.walk_type {
            next.walk_type = v;
        }
        if let Some(v) = update.duration_minutes {
            next.duration_minutes = v;
        }
        if let Some(v) = &update.date {
            next.date.clone_from(v);
        }
        if let Some(v) = &update.time {
            next.time.clone_from(v);
        }
        if let Some(v) = &update.address {
            next.address.clone_from(v);
        }
        if let Some(v) = update.use_current_location {
            next.use_current_location = v;
        }
        if let Some(v) = &update.selected_walker {
            next.selected_walker = Some(v.clone());
        }
        if let Some(v) = &update.pet_info {
            next.pet_info = v.clone();
        }
        if let Some(v) = &update.caution_templates {
            next.caution_templates = v.clone();
        }
        if let Some(v) = &update.custom_notes {
            next.custom_notes.clone_from(v);
        }
        if let Some(v) = &update.emergency_contact {
            next.emergency_contact.clone_from(v);
        }
        if let Some(v) = update.notifications {
            next.notifications = v;
        }
        if let Some(v) = update.payment_method {
            next.payment_method = v;
        }
        if let Some(v) = update.insurance_agreed {
            next.insurance_agreed = v;
        }
        next
    }

    /// Where the walk starts, as shown to the owner.
    pub fn location_label(&self) -> &str {
        if self.address.trim().is_empty() || self.use_current_location {
            "현재 위치"
        } else {
            &self.address
        }
    }
}

/// A partial draft. Every field is optional; unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DraftUpdate {
    pub walk_type: Option<WalkType>,
    #[serde(rename = "duration")]
    pub duration_minutes: Option<u32>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub address: Option<String>,
    pub use_current_location: Option<bool>,
    pub selected_walker: Option<Walker>,
    pub pet_info: Option<PetInfo>,
    pub caution_templates: Option<BTreeSet<String>>,
    pub custom_notes: Option<String>,
    pub emergency_contact: Option<String>,
    pub notifications: Option<NotificationSettings>,
    pub payment_method: Option<PaymentMethod>,
    pub insurance_agreed: Option<bool>,
}

impl DraftUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when merging this update requires re-pricing the draft.
    pub fn touches_pricing(&self) -> bool {
        self.walk_type.is_some()
            || self.duration_minutes.is_some()
            || self.payment_method.is_some()
            || self.insurance_agreed.is_some()
    }

    pub fn with_walk_type(mut self, walk_type: WalkType) -> Self {
        self.walk_type = Some(walk_type);
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_current_location(mut self, enabled: bool) -> Self {
        self.use_current_location = Some(enabled);
        self
    }

    pub fn with_walker(mut self, walker: Walker) -> Self {
        self.selected_walker = Some(walker);
        self
    }

    pub fn with_pet_info(mut self, pet_info: PetInfo) -> Self {
        self.pet_info = Some(pet_info);
        self
    }

    pub fn with_caution_templates(mut self, ids: BTreeSet<String>) -> Self {
        self.caution_templates = Some(ids);
        self
    }

    pub fn with_custom_notes(mut self, notes: impl Into<String>) -> Self {
        self.custom_notes = Some(notes.into());
        self
    }

    pub fn with_emergency_contact(mut self, phone: impl Into<String>) -> Self {
        self.emergency_contact = Some(phone.into());
        self
    }

    pub fn with_notifications(mut self, notifications: NotificationSettings) -> Self {
        self.notifications = Some(notifications);
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn with_insurance_agreed(mut self, agreed: bool) -> Self {
        self.insurance_agreed = Some(agreed);
        self
    }
}

/// Symmetric difference of `selected` with `{id}`.
pub fn toggle_template(selected: &BTreeSet<String>, id: &str) -> BTreeSet<String> {
    let mut next = selected.clone();
    if !next.remove(id) {
        next.insert(id.to_string());
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft() -> BookingDraft {
        let pet = PetInfo {
            name: "초코".into(),
            breed: "푸들".into(),
            ..PetInfo::default()
        };
        BookingDraft::default().merged(
            &DraftUpdate::new()
                .with_address("서울시 강남구 테헤란로 1")
                .with_date("2026-10-20")
                .with_time("14:00")
                .with_pet_info(pet)
                .with_emergency_contact("010-1234-5678"),
        )
    }

    #[test]
    fn defaults_follow_config() {
        let draft = BookingDraft::default();
        assert_eq!(draft.walk_type, WalkType::Single);
        assert_eq!(draft.duration_minutes, 60);
        assert_eq!(draft.payment_method, PaymentMethod::Card);
        assert!(draft.notifications.departure && draft.notifications.delay && draft.notifications.completion);
        assert!(!draft.insurance_agreed);
        assert!(draft.pricing.is_none());
    }

    #[test]
    fn successive_merges_keep_untouched_fields() {
        let before = filled_draft();
        let after = before
            .merged(&DraftUpdate::new().with_duration(90))
            .merged(&DraftUpdate::new().with_walk_type(WalkType::Package));

        assert_eq!(after.duration_minutes, 90);
        assert_eq!(after.walk_type, WalkType::Package);
        assert_eq!(after.address, before.address);
        assert_eq!(after.pet_info, before.pet_info);
        assert_eq!(after.date, before.date);
        assert_eq!(after.time, before.time);
        assert_eq!(after.emergency_contact, before.emergency_contact);
    }

    #[test]
    fn empty_update_is_identity() {
        let draft = filled_draft();
        assert!(DraftUpdate::new().is_empty());
        assert_eq!(draft.merged(&DraftUpdate::new()), draft);
    }

    #[test]
    fn pricing_relevant_fields() {
        assert!(DraftUpdate::new().with_duration(30).touches_pricing());
        assert!(DraftUpdate::new().with_insurance_agreed(true).touches_pricing());
        assert!(!DraftUpdate::new().with_custom_notes("x").touches_pricing());
    }

    #[test]
    fn toggling_twice_restores_the_set() {
        let start: BTreeSet<String> = ["leash".to_string()].into_iter().collect();
        for id in ["door_lock", "leash"] {
            let once = toggle_template(&start, id);
            assert_ne!(once, start);
            assert_eq!(toggle_template(&once, id), start);
        }
    }

    #[test]
    fn location_label_falls_back_to_current_location() {
        let mut draft = BookingDraft::default();
        assert_eq!(draft.location_label(), "현재 위치");
        draft.address = "역삼동".into();
        assert_eq!(draft.location_label(), "역삼동");
        draft.use_current_location = true;
        assert_eq!(draft.location_label(), "현재 위치");
    }

    #[test]
    fn update_deserializes_from_partial_json() {
        let update: DraftUpdate =
            serde_json::from_str(r#"{"duration": 90, "walkType": "package"}"#).expect("parse");
        assert_eq!(update.duration_minutes, Some(90));
        assert_eq!(update.walk_type, Some(WalkType::Package));
        assert!(update.address.is_none());
    }
}
