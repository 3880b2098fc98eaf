//! Leg accumulation: the provisional -> finalized promotion state machine.
//!
//! Every accepted job is folded into the accumulator for its directed
//! route. A leg stays provisional until its cumulative amount reaches the
//! configured minimum, then is promoted permanently for the invocation.

use crate::models::{Job, LegKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Geometry of a leg key, computed once when the key is first seen.
/// All jobs sharing a key have identical endpoints, so bearing and
/// distance belong to the key, not to individual jobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegGeometry {
    pub bearing_deg: f64,
    /// Rounded to the nearest whole configured unit.
    pub distance: u32,
}

/// Accumulated totals for one directed route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub amount: u32,
    pub pay: f64,
    pub jobs: Vec<Job>,
    pub bearing_deg: f64,
    pub distance: u32,
}

impl Leg {
    fn new(geometry: LegGeometry) -> Self {
        Self {
            bearing_deg: geometry.bearing_deg,
            distance: geometry.distance,
            ..Self::default()
        }
    }

    fn add(&mut self, job: &Job) {
        self.amount += job.amount;
        self.pay += job.pay;
        self.jobs.push(job.clone());
    }
}

/// Per-key lifecycle state. The transition is one-way: a finalized leg
/// never returns to provisional within an invocation.
#[derive(Debug, Clone, PartialEq)]
enum LegState {
    Provisional(Leg),
    Finalized(Leg),
}

/// Folds accepted jobs into per-route accumulators and tracks the
/// maximum finalized volume.
#[derive(Debug, Default)]
pub struct LegAggregator {
    min_amount: Option<u32>,
    legs: HashMap<LegKey, LegState>,
    max_amount: u32,
}

impl LegAggregator {
    /// `min_amount = None` promotes every leg on creation.
    pub fn new(min_amount: Option<u32>) -> Self {
        Self {
            min_amount,
            ..Self::default()
        }
    }

    /// Fold one accepted job into its leg. `geometry` is only evaluated
    /// the first time the key is seen. Returns true when the leg is
    /// finalized after this push.
    pub fn push<F>(&mut self, key: LegKey, job: &Job, geometry: F) -> bool
    where
        F: FnOnce() -> LegGeometry,
    {
        let state = self
            .legs
            .entry(key)
            .or_insert_with(|| LegState::Provisional(Leg::new(geometry())));

        match state {
            LegState::Finalized(leg) => {
                // Already promoted: accumulate without re-checking the
                // threshold. Permanence is deliberate.
                leg.add(job);
                self.max_amount = self.max_amount.max(leg.amount);
                true
            }
            LegState::Provisional(leg) => {
                leg.add(job);
                let promote = self.min_amount.map_or(true, |min| leg.amount >= min);
                if promote {
                    self.max_amount = self.max_amount.max(leg.amount);
                    let leg = std::mem::take(leg);
                    *state = LegState::Finalized(leg);
                }
                promote
            }
        }
    }

    /// Maximum cumulative amount across finalized legs so far (0 if none).
    pub fn max_amount(&self) -> u32 {
        self.max_amount
    }

    /// Drop provisional legs and yield the finalized mapping with the
    /// maximum finalized amount.
    pub fn into_finalized(self) -> (HashMap<LegKey, Leg>, u32) {
        let legs = self
            .legs
            .into_iter()
            .filter_map(|(key, state)| match state {
                LegState::Finalized(leg) => Some((key, leg)),
                LegState::Provisional(_) => None,
            })
            .collect();
        (legs, self.max_amount)
    }
}
