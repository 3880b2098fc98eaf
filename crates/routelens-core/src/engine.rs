//! Single-pass orchestration: predicate, aggregation, result assembly.

use crate::airports::AirportIndex;
use crate::error::Error;
use crate::legs::{Leg, LegAggregator, LegGeometry};
use crate::models::{FilterConfig, Job, LegKey};
use crate::predicate::{self, Anchors};
use crate::spatial;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Output of one engine invocation, handed to the external renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterOutput {
    /// Every airport that must get a marker: anchors, rentable bases, and
    /// the endpoints of each finalized leg.
    pub airports: HashSet<String>,
    /// Finalized legs only; provisional accumulators are never exposed.
    pub legs: HashMap<LegKey, Leg>,
    /// Largest cumulative amount among finalized legs, for visual weight
    /// scaling. Zero when no leg finalized.
    pub max_amount: u32,
}

/// Filter `jobs` against `config` and aggregate the survivors into legs.
///
/// One bounded pass, no I/O, no shared mutable state: identical inputs
/// yield identical outputs. Which specific job tips a leg over the
/// promotion threshold depends on iteration order and is not guaranteed;
/// final totals are order-independent.
///
/// Fails with [`Error::UnknownAirport`] when a job or anchor references a
/// code absent from the index.
pub fn run(
    jobs: &HashMap<String, Job>,
    config: &FilterConfig,
    airports: &AirportIndex,
) -> Result<FilterOutput, Error> {
    let mut markers: HashSet<String> = config.rentable_bases.iter().cloned().collect();
    if let Some(code) = &config.origin {
        markers.insert(code.clone());
    }
    if let Some(code) = &config.dest {
        markers.insert(code.clone());
    }

    let anchors = Anchors {
        origin: resolve_anchor(config.origin.as_deref(), airports)?,
        dest: resolve_anchor(config.dest.as_deref(), airports)?,
    };

    let mut aggregator = LegAggregator::new(config.min_leg_amount);
    let mut accepted = 0usize;
    for job in jobs.values() {
        let from = airports.coord(&job.from)?;
        let to = airports.coord(&job.to)?;
        if !predicate::accept(job, from, to, &anchors, config) {
            continue;
        }
        accepted += 1;

        let key = LegKey::new(&job.from, &job.to);
        let finalized = aggregator.push(key, job, || LegGeometry {
            bearing_deg: spatial::rhumb_bearing_deg(from, to),
            distance: spatial::distance(from, to, config.distance_unit).round() as u32,
        });
        if finalized {
            markers.insert(job.from.clone());
            markers.insert(job.to.clone());
        }
    }

    let (legs, max_amount) = aggregator.into_finalized();
    tracing::debug!(
        total = jobs.len(),
        accepted,
        legs = legs.len(),
        max_amount,
        "filtered jobs into legs"
    );

    Ok(FilterOutput {
        airports: markers,
        legs,
        max_amount,
    })
}

fn resolve_anchor(
    code: Option<&str>,
    airports: &AirportIndex,
) -> Result<Option<spatial::Coord>, Error> {
    code.map(|c| airports.coord(c)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airports::{AirportClass, AirportRecord};
    use crate::models::{JobType, UnitType};

    fn index() -> AirportIndex {
        [
            ("AAAA", 0.0, 0.0),
            ("BBBB", 0.0, 1.0),
            ("CCCC", 1.0, 1.0),
        ]
        .into_iter()
        .map(|(code, lat, lon)| {
            (
                code.to_string(),
                AirportRecord::new(lat, lon, AirportClass::Civil),
            )
        })
        .collect()
    }

    fn cargo_job(from: &str, to: &str, amount: u32, pay: f64) -> Job {
        Job {
            from: from.into(),
            to: to.into(),
            kind: JobType::TripOnly,
            unit: UnitType::Kg,
            amount,
            pay,
        }
    }

    #[test]
    fn unknown_job_airport_propagates() {
        let jobs = HashMap::from([("1".to_string(), cargo_job("AAAA", "ZZZZ", 10, 50.0))]);
        let config = FilterConfig::new(JobType::TripOnly, UnitType::Kg);
        let err = run(&jobs, &config, &index()).unwrap_err();
        assert_eq!(err, Error::unknown_airport("ZZZZ"));
    }

    #[test]
    fn unknown_anchor_propagates_even_without_jobs() {
        let mut config = FilterConfig::new(JobType::TripOnly, UnitType::Kg);
        config.origin = Some("ZZZZ".to_string());
        let err = run(&HashMap::new(), &config, &index()).unwrap_err();
        assert_eq!(err, Error::unknown_airport("ZZZZ"));
    }

    #[test]
    fn anchors_and_bases_are_marked_without_any_legs() {
        let mut config = FilterConfig::new(JobType::TripOnly, UnitType::Kg);
        config.origin = Some("AAAA".to_string());
        config.rentable_bases.insert("CCCC".to_string());

        let out = run(&HashMap::new(), &config, &index()).unwrap();
        assert_eq!(
            out.airports,
            HashSet::from(["AAAA".to_string(), "CCCC".to_string()])
        );
        assert!(out.legs.is_empty());
        assert_eq!(out.max_amount, 0);
    }

    #[test]
    fn finalized_leg_adds_endpoint_markers() {
        let jobs = HashMap::from([("1".to_string(), cargo_job("AAAA", "BBBB", 10, 50.0))]);
        let config = FilterConfig::new(JobType::TripOnly, UnitType::Kg);

        let out = run(&jobs, &config, &index()).unwrap();
        assert_eq!(
            out.airports,
            HashSet::from(["AAAA".to_string(), "BBBB".to_string()])
        );
        assert_eq!(out.legs.len(), 1);
        assert_eq!(out.max_amount, 10);

        let leg = &out.legs[&LegKey::new("AAAA", "BBBB")];
        // 1 degree along the equator, ~69 statute miles due east.
        assert_eq!(leg.distance, 69);
        assert!((leg.bearing_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn provisional_legs_leave_no_trace() {
        let jobs = HashMap::from([("1".to_string(), cargo_job("AAAA", "BBBB", 10, 50.0))]);
        let mut config = FilterConfig::new(JobType::TripOnly, UnitType::Kg);
        config.min_leg_amount = Some(100);

        let out = run(&jobs, &config, &index()).unwrap();
        assert!(out.airports.is_empty());
        assert!(out.legs.is_empty());
        assert_eq!(out.max_amount, 0);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let jobs = HashMap::from([
            ("1".to_string(), cargo_job("AAAA", "BBBB", 40, 50.0)),
            ("2".to_string(), cargo_job("BBBB", "CCCC", 70, 90.0)),
            ("3".to_string(), cargo_job("AAAA", "BBBB", 25, 30.0)),
        ]);
        let config = FilterConfig::new(JobType::TripOnly, UnitType::Kg);
        let index = index();

        let a = run(&jobs, &config, &index).unwrap();
        let b = run(&jobs, &config, &index).unwrap();
        assert_eq!(a.airports, b.airports);
        assert_eq!(a.max_amount, b.max_amount);
        assert_eq!(a.legs.len(), b.legs.len());
        for (key, leg) in &a.legs {
            assert_eq!(b.legs[key].amount, leg.amount);
            assert_eq!(b.legs[key].pay, leg.pay);
        }
    }
}
