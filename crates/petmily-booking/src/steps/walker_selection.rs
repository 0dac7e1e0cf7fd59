// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Step 2: choose a walker from the candidate list, nearest first.
//
// A walker can be picked from the list or from the detail view; both
// produce the same update. Availability is not checked against the
// requested date and time.

use std::cmp::Ordering;

use petmily_core::error::{PetmilyError, Result};
use petmily_core::types::Walker;
use tracing::debug;

use super::Step;
use crate::draft::{BookingDraft, DraftUpdate};
use crate::validation::WizardStep;

#[derive(Debug, Clone)]
pub struct WalkerSelectionStep {
    candidates: Vec<Walker>,
    detail: Option<usize>,
}

impl Step for WalkerSelectionStep {
    const STEP: WizardStep = WizardStep::WalkerSelection;
}

fn by_distance(a: &Walker, b: &Walker) -> Ordering {
    match (a.distance_meters(), b.distance_meters()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl WalkerSelectionStep {
    /// Candidates sorted by distance. Unparsable distances go last.
    pub fn new(mut candidates: Vec<Walker>) -> Self {
        candidates.sort_by(by_distance);
        Self {
            candidates,
            detail: None,
        }
    }

    pub fn candidates(&self) -> &[Walker] {
        &self.candidates
    }

    pub fn find(&self, id: &str) -> Option<&Walker> {
        self.candidates.iter().find(|w| w.id == id)
    }

    pub fn is_selected(&self, draft: &BookingDraft, id: &str) -> bool {
        draft.selected_walker.as_ref().is_some_and(|w| w.id == id)
    }

    pub fn select_walker(&self, walker: &Walker) -> DraftUpdate {
        debug!(walker_id = %walker.id, "walker selected");
        DraftUpdate::new().with_walker(walker.clone())
    }

    pub fn select_by_id(&self, id: &str) -> Result<DraftUpdate> {
        self.find(id)
            .map(|w| self.select_walker(w))
            .ok_or_else(|| PetmilyError::UnknownWalker(id.to_string()))
    }

    /// Open the detail view for one candidate.
    pub fn open_detail(&mut self, id: &str) -> Result<&Walker> {
        let index = self
            .candidates
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| PetmilyError::UnknownWalker(id.to_string()))?;
        self.detail = Some(index);
        Ok(&self.candidates[index])
    }

    pub fn detail(&self) -> Option<&Walker> {
        self.detail.and_then(|i| self.candidates.get(i))
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Select the walker shown in the detail view and close it.
    /// `None` when no detail view is open.
    pub fn select_from_detail(&mut self) -> Option<DraftUpdate> {
        let update = self.detail().map(|w| self.select_walker(w));
        self.detail = None;
        update
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker(id: &str, distance: &str) -> Walker {
        Walker {
            id: id.into(),
            name: format!("워커 {id}"),
            distance: distance.into(),
            rating: 4.5,
            review_count: 10,
            experience: "1년 경험".into(),
            introduction: String::new(),
            available_times: vec!["09:00".into(), "14:00".into()],
            reviews: Vec::new(),
        }
    }

    fn step() -> WalkerSelectionStep {
        WalkerSelectionStep::new(vec![
            walker("3", "1.2km"),
            walker("x", "근처"),
            walker("1", "0.5km"),
            walker("2", "800m"),
        ])
    }

    #[test]
    fn candidates_are_nearest_first() {
        let step = step();
        let ids: Vec<&str> = step.candidates().iter().map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "x"]);
    }

    #[test]
    fn list_and_detail_produce_the_same_update() {
        let mut step = step();
        let from_list = step.select_by_id("2").expect("select");
        step.open_detail("2").expect("open");
        let from_detail = step.select_from_detail().expect("selected");
        assert_eq!(from_list, from_detail);
        assert!(step.detail().is_none());
        assert!(step.select_from_detail().is_none());
    }

    #[test]
    fn unknown_walker_is_an_error() {
        let mut step = step();
        assert!(matches!(step.select_by_id("9"), Err(PetmilyError::UnknownWalker(_))));
        assert!(step.open_detail("9").is_err());
    }

    #[test]
    fn selection_ignores_requested_time() {
        let step = step();
        let draft = BookingDraft::default().merged(&DraftUpdate::new().with_time("03:00"));
        let draft = draft.merged(&step.select_by_id("1").expect("select"));
        assert!(step.is_selected(&draft, "1"));
        assert!(step.can_proceed(&draft));
    }
}
