//! Recently generated plans, newest first, as kept by a presentation host.
//!
//! The server never stores these. The type serializes to the same JSON array a
//! browser store holds, so a host can load, update and write it back.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub const HISTORY_CAPACITY: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedPlan {
    pub id: String,
    pub html: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl SavedPlan {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            id: format!("plan-{}", Uuid::new_v4()),
            html: html.into(),
            date: OffsetDateTime::now_utc(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<SavedPlan>", into = "Vec<SavedPlan>")]
pub struct PlanHistory {
    plans: Vec<SavedPlan>,
}

impl From<Vec<SavedPlan>> for PlanHistory {
    fn from(mut plans: Vec<SavedPlan>) -> Self {
        plans.truncate(HISTORY_CAPACITY);
        Self { plans }
    }
}

impl From<PlanHistory> for Vec<SavedPlan> {
    fn from(history: PlanHistory) -> Self {
        history.plans
    }
}

impl PlanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `html` as the newest plan, evicting the oldest past capacity.
    pub fn record(&mut self, html: impl Into<String>) -> &SavedPlan {
        self.push(SavedPlan::new(html))
    }

    pub fn push(&mut self, plan: SavedPlan) -> &SavedPlan {
        self.plans.insert(0, plan);
        self.plans.truncate(HISTORY_CAPACITY);
        &self.plans[0]
    }

    pub fn remove(&mut self, id: &str) -> Option<SavedPlan> {
        let idx = self.plans.iter().position(|p| p.id == id)?;
        Some(self.plans.remove(idx))
    }

    pub fn get(&self, id: &str) -> Option<&SavedPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn plans(&self) -> &[SavedPlan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
