// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wizard steps, their field schemas, and the schema-driven step validator.
//
// Each step is described by a static list of `FieldSpec`s. Validation is
// advisory: the controller only blocks on it when configured to.

use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::SUPPORTED_DURATIONS;
use serde::Serialize;

use crate::draft::BookingDraft;

/// The five wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WizardStep {
    BasicInfo = 1,
    WalkerSelection = 2,
    WalkSettings = 3,
    Payment = 4,
    Confirmation = 5,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::BasicInfo,
        WizardStep::WalkerSelection,
        WizardStep::WalkSettings,
        WizardStep::Payment,
        WizardStep::Confirmation,
    ];

    /// 1-based position in the wizard.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Result<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(usize::from(i)).copied())
            .ok_or(PetmilyError::NoSuchStep(n))
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "기본 정보",
            WizardStep::WalkerSelection => "워커 선택",
            WizardStep::WalkSettings => "산책 설정",
            WizardStep::Payment => "결제",
            WizardStep::Confirmation => "예약 확인",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1).ok()
    }

    pub fn is_last(self) -> bool {
        self == WizardStep::Confirmation
    }

    pub fn schema(self) -> &'static StepSchema {
        &SCHEMAS[usize::from(self.number() - 1)]
    }
}

/// A draft field a step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DraftField {
    WalkType,
    Duration,
    Date,
    Time,
    Address,
    SelectedWalker,
    PetName,
    PetBreed,
    CautionTemplates,
    CustomNotes,
    EmergencyContact,
    Notifications,
    PaymentMethod,
    InsuranceAgreed,
}

/// What the validator found for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldStatus {
    Filled,
    Empty,
    /// Set, but to a value the booking cannot use.
    Invalid,
}

fn text(value: &str) -> FieldStatus {
    if value.trim().is_empty() {
        FieldStatus::Empty
    } else {
        FieldStatus::Filled
    }
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::WalkType => "산책 유형",
            DraftField::Duration => "산책 시간",
            DraftField::Date => "날짜",
            DraftField::Time => "시간",
            DraftField::Address => "주소",
            DraftField::SelectedWalker => "워커",
            DraftField::PetName => "반려동물 이름",
            DraftField::PetBreed => "품종",
            DraftField::CautionTemplates => "주의사항",
            DraftField::CustomNotes => "추가 요청사항",
            DraftField::EmergencyContact => "비상 연락처",
            DraftField::Notifications => "알림 설정",
            DraftField::PaymentMethod => "결제 수단",
            DraftField::InsuranceAgreed => "보험 약관 동의",
        }
    }

    pub fn status(self, draft: &BookingDraft) -> FieldStatus {
        match self {
            DraftField::WalkType | DraftField::Notifications | DraftField::PaymentMethod => {
                FieldStatus::Filled
            }
            DraftField::Duration => {
                if SUPPORTED_DURATIONS.contains(&draft.duration_minutes) {
                    FieldStatus::Filled
                } else {
                    FieldStatus::Invalid
                }
            }
            DraftField::Date => text(&draft.date),
            DraftField::Time => text(&draft.time),
            DraftField::Address => {
                if draft.use_current_location {
                    FieldStatus::Filled
                } else {
                    text(&draft.address)
                }
            }
            DraftField::SelectedWalker => {
                if draft.selected_walker.is_some() {
                    FieldStatus::Filled
                } else {
                    FieldStatus::Empty
                }
            }
            DraftField::PetName => text(&draft.pet_info.name),
            DraftField::PetBreed => text(&draft.pet_info.breed),
            DraftField::CautionTemplates => {
                if draft.caution_templates.is_empty() {
                    FieldStatus::Empty
                } else {
                    FieldStatus::Filled
                }
            }
            DraftField::CustomNotes => text(&draft.custom_notes),
            DraftField::EmergencyContact => text(&draft.emergency_contact),
            DraftField::InsuranceAgreed => {
                if draft.insurance_agreed {
                    FieldStatus::Filled
                } else {
                    FieldStatus::Empty
                }
            }
        }
    }
}

/// One entry of a step schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub field: DraftField,
    pub required: bool,
}

const fn required(field: DraftField) -> FieldSpec {
    FieldSpec { field, required: true }
}

const fn optional(field: DraftField) -> FieldSpec {
    FieldSpec { field, required: false }
}

/// The fields one step collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepSchema {
    pub step: WizardStep,
    pub fields: &'static [FieldSpec],
}

impl StepSchema {
    pub fn required_fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.fields.iter().filter(|f| f.required).map(|f| f.field)
    }
}

static SCHEMAS: [StepSchema; 5] = [
    StepSchema {
        step: WizardStep::BasicInfo,
        fields: &[
            required(DraftField::WalkType),
            required(DraftField::Duration),
            required(DraftField::Date),
            required(DraftField::Time),
            required(DraftField::Address),
        ],
    },
    StepSchema {
        step: WizardStep::WalkerSelection,
        fields: &[required(DraftField::SelectedWalker)],
    },
    StepSchema {
        step: WizardStep::WalkSettings,
        fields: &[
            required(DraftField::PetName),
            required(DraftField::PetBreed),
            optional(DraftField::CautionTemplates),
            optional(DraftField::CustomNotes),
            optional(DraftField::EmergencyContact),
            optional(DraftField::Notifications),
        ],
    },
    StepSchema {
        step: WizardStep::Payment,
        fields: &[
            required(DraftField::PaymentMethod),
            required(DraftField::InsuranceAgreed),
        ],
    },
    StepSchema {
        step: WizardStep::Confirmation,
        fields: &[],
    },
];

/// Result of validating one step against a draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub step: WizardStep,
    /// Required fields left empty.
    pub missing: Vec<DraftField>,
    /// Fields holding unusable values, required or not.
    pub invalid: Vec<DraftField>,
}

impl StepReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    /// `IncompleteStep` naming every offending field, or `Ok`.
    pub fn into_result(self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        let missing = self
            .missing
            .iter()
            .chain(self.invalid.iter())
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(", ");
        Err(PetmilyError::IncompleteStep {
            step: self.step.number(),
            missing,
        })
    }
}

/// Checks a draft against a step's schema.
pub struct StepValidator;

impl StepValidator {
    pub fn validate(step: WizardStep, draft: &BookingDraft) -> StepReport {
        let mut report = StepReport {
            step,
            missing: Vec::new(),
            invalid: Vec::new(),
        };
        for spec in step.schema().fields {
            match spec.field.status(draft) {
                FieldStatus::Filled => {}
                FieldStatus::Empty if spec.required => report.missing.push(spec.field),
                FieldStatus::Empty => {}
                FieldStatus::Invalid => report.invalid.push(spec.field),
            }
        }
        report
    }

    /// Every step up to and including `last`.
    pub fn validate_through(last: WizardStep, draft: &BookingDraft) -> Vec<StepReport> {
        WizardStep::ALL
            .iter()
            .filter(|s| **s <= last)
            .map(|s| Self::validate(*s, draft))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftUpdate;
    use petmily_core::types::PetInfo;

    #[test]
    fn step_numbers_round_trip() {
        for step in WizardStep::ALL {
            assert_eq!(WizardStep::from_number(step.number()).expect("step"), step);
            assert_eq!(step.schema().step, step);
        }
        assert!(WizardStep::from_number(0).is_err());
        assert!(WizardStep::from_number(6).is_err());
        assert_eq!(WizardStep::BasicInfo.prev(), None);
        assert_eq!(WizardStep::Confirmation.next(), None);
    }

    #[test]
    fn empty_basic_info_reports_required_fields() {
        let report = StepValidator::validate(WizardStep::BasicInfo, &BookingDraft::default());
        assert_eq!(
            report.missing,
            vec![DraftField::Date, DraftField::Time, DraftField::Address]
        );
        assert!(report.invalid.is_empty());
        assert!(!report.is_complete());
    }

    #[test]
    fn current_location_satisfies_address() {
        let draft = BookingDraft::default().merged(
            &DraftUpdate::new()
                .with_date("내일")
                .with_time("오후 2시")
                .with_current_location(true),
        );
        assert!(StepValidator::validate(WizardStep::BasicInfo, &draft).is_complete());
    }

    #[test]
    fn unsupported_duration_is_invalid() {
        let draft = BookingDraft::default().merged(&DraftUpdate::new().with_duration(45));
        let report = StepValidator::validate(WizardStep::BasicInfo, &draft);
        assert_eq!(report.invalid, vec![DraftField::Duration]);
    }

    #[test]
    fn walk_settings_only_require_name_and_breed() {
        let draft = BookingDraft::default().merged(&DraftUpdate::new().with_pet_info(PetInfo {
            name: "보리".into(),
            breed: "진돗개".into(),
            ..PetInfo::default()
        }));
        assert!(StepValidator::validate(WizardStep::WalkSettings, &draft).is_complete());
    }

    #[test]
    fn incomplete_report_becomes_error() {
        let err = StepValidator::validate(WizardStep::Payment, &BookingDraft::default())
            .into_result()
            .unwrap_err();
        match err {
            PetmilyError::IncompleteStep { step, missing } => {
                assert_eq!(step, 4);
                assert_eq!(missing, "보험 약관 동의");
            }
            other => panic!("unexpected error variant: {other}"),
        }
    }

    #[test]
    fn confirmation_has_no_requirements() {
        assert!(StepValidator::validate(WizardStep::Confirmation, &BookingDraft::default()).is_complete());
        assert_eq!(
            StepValidator::validate_through(WizardStep::WalkerSelection, &BookingDraft::default()).len(),
            2
        );
    }
}
