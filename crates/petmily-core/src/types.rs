// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Petmily walking-service booking flow.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PetmilyError;

/// Unique identifier for a confirmed booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-time walk or a recurring walking package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalkType {
    #[default]
    Single,
    Package,
}

impl WalkType {
    pub const ALL: [WalkType; 2] = [WalkType::Single, WalkType::Package];

    /// Display label shown on the walk-type cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "일회성 산책",
            Self::Package => "정기 산책 패키지",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Single => "한 번만 산책",
            Self::Package => "주기적으로 산책",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Package => "package",
        }
    }
}

impl FromStr for WalkType {
    type Err = PetmilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "package" => Ok(Self::Package),
            _ => Err(PetmilyError::UnknownWalkType(s.to_string())),
        }
    }
}

/// Walk durations offered by the booking form, in minutes.
pub const SUPPORTED_DURATIONS: [u32; 3] = [30, 60, 90];

/// Duration chosen when nothing has been picked yet.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// Chip label for a duration option. Unknown values fall back to "N분".
pub fn duration_label(minutes: u32) -> String {
    match minutes {
        60 => "1시간".to_string(),
        m => format!("{m}분"),
    }
}

/// How the walk will be paid for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Kakao,
    Naver,
    Toss,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Kakao,
        PaymentMethod::Naver,
        PaymentMethod::Toss,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Card => "신용/체크카드",
            Self::Kakao => "카카오페이",
            Self::Naver => "네이버페이",
            Self::Toss => "토스페이",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Card => "간편하고 안전한 카드 결제",
            Self::Kakao => "카카오톡으로 간편결제",
            Self::Naver => "네이버 간편결제",
            Self::Toss => "토스 간편결제",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PetmilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "kakao" => Ok(Self::Kakao),
            "naver" => Ok(Self::Naver),
            "toss" => Ok(Self::Toss),
            _ => Err(PetmilyError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// A review left for a walker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkerReview {
    pub id: String,
    pub rating: u8,
    pub comment: String,
    pub date: String,
    pub author: String,
}

/// A walker candidate offered in the walker-selection step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Walker {
    pub id: String,
    pub name: String,
    /// Distance as displayed, e.g. "0.5km" or "650m".
    pub distance: String,
    pub rating: f32,
    pub review_count: u32,
    pub experience: String,
    pub introduction: String,
    #[serde(default)]
    pub available_times: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<WalkerReview>,
}

impl Walker {
    /// Distance in metres parsed from the display string ("0.8km", "650m", "1.2 km").
    pub fn distance_meters(&self) -> Option<f64> {
        let raw = self.distance.trim().to_ascii_lowercase();
        if let Some(km) = raw.strip_suffix("km") {
            return km.trim().parse::<f64>().ok().map(|v| v * 1000.0);
        }
        if let Some(m) = raw.strip_suffix('m') {
            return m.trim().parse::<f64>().ok();
        }
        None
    }
}

/// Pet details attached to a booking. Every field is free text.
///
/// Serialised with camelCase keys so the profile saved by the pet-info
/// screen (`medicalInfo`, ...) round-trips unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PetInfo {
    pub name: String,
    pub breed: String,
    pub age: String,
    pub weight: String,
    pub temperament: String,
    pub medical_info: String,
}

/// Editable fields of [`PetInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetField {
    Name,
    Breed,
    Age,
    Weight,
    Temperament,
    MedicalInfo,
}

impl PetInfo {
    /// True when no field has been filled in.
    pub fn is_blank(&self) -> bool {
        [
            &self.name,
            &self.breed,
            &self.age,
            &self.weight,
            &self.temperament,
            &self.medical_info,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }

    pub fn get(&self, field: PetField) -> &str {
        match field {
            PetField::Name => &self.name,
            PetField::Breed => &self.breed,
            PetField::Age => &self.age,
            PetField::Weight => &self.weight,
            PetField::Temperament => &self.temperament,
            PetField::MedicalInfo => &self.medical_info,
        }
    }

    pub fn set(&mut self, field: PetField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PetField::Name => self.name = value,
            PetField::Breed => self.breed = value,
            PetField::Age => self.age = value,
            PetField::Weight => self.weight = value,
            PetField::Temperament => self.temperament = value,
            PetField::MedicalInfo => self.medical_info = value,
        }
    }
}

/// Which progress notifications the owner wants during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub departure: bool,
    pub delay: bool,
    pub completion: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            departure: true,
            delay: true,
            completion: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Departure,
    Delay,
    Completion,
}

impl NotificationSettings {
    pub fn is_enabled(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Departure => self.departure,
            NotificationKind::Delay => self.delay,
            NotificationKind::Completion => self.completion,
        }
    }

    /// Copy with one switch flipped.
    pub fn toggled(mut self, kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Departure => self.departure = !self.departure,
            NotificationKind::Delay => self.delay = !self.delay,
            NotificationKind::Completion => self.completion = !self.completion,
        }
        self
    }
}

/// A pre-authored caution item the owner can attach for the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CautionTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed catalog of caution templates.
pub const CAUTION_TEMPLATES: [CautionTemplate; 6] = [
    CautionTemplate {
        id: "door_lock",
        title: "🚪 도어락 정보",
        description: "도어락 비밀번호 및 사용법",
    },
    CautionTemplate {
        id: "elevator",
        title: "🏢 엘리베이터 이용",
        description: "엘리베이터 사용 시 주의사항",
    },
    CautionTemplate {
        id: "sociability",
        title: "🐕 사회성",
        description: "다른 반려동물과의 관계",
    },
    CautionTemplate {
        id: "leash",
        title: "🦮 목줄/하네스",
        description: "목줄 착용 및 산책 방법",
    },
    CautionTemplate {
        id: "health",
        title: "💊 건강 상태",
        description: "복용 중인 약물이나 주의할 질병",
    },
    CautionTemplate {
        id: "behavior",
        title: "🎾 행동 특성",
        description: "특별한 행동이나 습관",
    },
];

/// Look up a caution template by id.
pub fn caution_template(id: &str) -> Option<&'static CautionTemplate> {
    CAUTION_TEMPLATES.iter().find(|t| t.id == id)
}

/// Delivery cadence for recurring product purchases, shortest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubscriptionCycle {
    #[serde(rename = "1주")]
    OneWeek,
    #[serde(rename = "2주")]
    TwoWeeks,
    #[default]
    #[serde(rename = "1개월")]
    OneMonth,
    #[serde(rename = "2개월")]
    TwoMonths,
    #[serde(rename = "3개월")]
    ThreeMonths,
}

impl SubscriptionCycle {
    pub const ALL: [SubscriptionCycle; 5] = [
        SubscriptionCycle::OneWeek,
        SubscriptionCycle::TwoWeeks,
        SubscriptionCycle::OneMonth,
        SubscriptionCycle::TwoMonths,
        SubscriptionCycle::ThreeMonths,
    ];

    /// Stored value ("1주", "1개월", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneWeek => "1주",
            Self::TwoWeeks => "2주",
            Self::OneMonth => "1개월",
            Self::TwoMonths => "2개월",
            Self::ThreeMonths => "3개월",
        }
    }

    /// Button label ("1주마다", ...).
    pub fn label(&self) -> String {
        format!("{}마다", self.as_str())
    }
}

impl FromStr for SubscriptionCycle {
    type Err = PetmilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed.strip_suffix("마다").unwrap_or(trimmed);
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| PetmilyError::UnknownCycle(s.to_string()))
    }
}

/// Weekday on which subscription deliveries arrive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryDay {
    #[default]
    #[serde(rename = "월요일")]
    Monday,
    #[serde(rename = "화요일")]
    Tuesday,
    #[serde(rename = "수요일")]
    Wednesday,
    #[serde(rename = "목요일")]
    Thursday,
    #[serde(rename = "금요일")]
    Friday,
    #[serde(rename = "토요일")]
    Saturday,
}

impl DeliveryDay {
    pub const ALL: [DeliveryDay; 6] = [
        DeliveryDay::Monday,
        DeliveryDay::Tuesday,
        DeliveryDay::Wednesday,
        DeliveryDay::Thursday,
        DeliveryDay::Friday,
        DeliveryDay::Saturday,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monday => "월요일",
            Self::Tuesday => "화요일",
            Self::Wednesday => "수요일",
            Self::Thursday => "목요일",
            Self::Friday => "금요일",
            Self::Saturday => "토요일",
        }
    }
}

impl FromStr for DeliveryDay {
    type Err = PetmilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.label() == s.trim())
            .ok_or_else(|| PetmilyError::UnknownDeliveryDay(s.to_string()))
    }
}
