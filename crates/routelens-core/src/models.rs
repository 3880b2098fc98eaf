//! Core data models: job records, filter configuration, and leg keys.

use crate::spatial::DistanceUnit;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A point-to-point cargo or passenger assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Origin airport code
    pub from: String,
    /// Destination airport code
    pub to: String,
    pub kind: JobType,
    pub unit: UnitType,
    /// Unit count (kg or passenger seats)
    pub amount: u32,
    /// Payout; zero means non-paying and is always rejected
    #[serde(default)]
    pub pay: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    TripOnly,
    VipOnly,
    AllIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Passengers,
    Kg,
}

/// Thresholds applied relative to one anchor airport.
///
/// Each field disables its check when absent. Values arriving as strings
/// (form input passed through verbatim) are parsed leniently: blank or
/// malformed text means "not configured" rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorRules {
    /// Minimum ratio of far-leg to near-leg distance; below it the job is
    /// judged to move away from (or insufficiently toward) the anchor.
    #[serde(deserialize_with = "lenient_f64")]
    pub dist_ratio: Option<f64>,
    /// Maximum distance from the anchor to the near endpoint, in the
    /// configured distance unit.
    #[serde(deserialize_with = "lenient_f64")]
    pub max_dist: Option<f64>,
    /// Maximum angular deviation between the job track and the anchor
    /// approach, in degrees. Boundary is inclusive.
    #[serde(deserialize_with = "lenient_f64")]
    pub max_angle_deg: Option<f64>,
}

impl AnchorRules {
    pub fn is_empty(&self) -> bool {
        self.dist_ratio.is_none() && self.max_dist.is_none() && self.max_angle_deg.is_none()
    }
}

/// Global bearing constraint: keep jobs tracking toward `target_deg`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingRule {
    pub target_deg: f64,
    /// Absent disables the check entirely.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub max_deviation_deg: Option<f64>,
}

/// Filter criteria for one engine invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Origin anchor airport code
    pub origin: Option<String>,
    /// Destination anchor airport code
    pub dest: Option<String>,
    pub kind: JobType,
    pub unit: UnitType,
    /// Per-job unit cap (e.g. aircraft capacity)
    #[serde(deserialize_with = "lenient_u32")]
    pub max_amount: Option<u32>,
    /// Minimum cumulative volume before a leg is exposed
    #[serde(deserialize_with = "lenient_u32")]
    pub min_leg_amount: Option<u32>,
    pub heading: Option<HeadingRule>,
    #[serde(deserialize_with = "lenient_f64")]
    pub min_route_dist: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub max_route_dist: Option<f64>,
    pub origin_rules: AnchorRules,
    pub dest_rules: AnchorRules,
    /// Airports with a rentable vehicle based there. Marker display only;
    /// never filters jobs.
    pub rentable_bases: HashSet<String>,
    pub distance_unit: DistanceUnit,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            origin: None,
            dest: None,
            kind: JobType::TripOnly,
            unit: UnitType::Kg,
            max_amount: None,
            min_leg_amount: None,
            heading: None,
            min_route_dist: None,
            max_route_dist: None,
            origin_rules: AnchorRules::default(),
            dest_rules: AnchorRules::default(),
            rentable_bases: HashSet::new(),
            distance_unit: DistanceUnit::default(),
        }
    }
}

impl FilterConfig {
    pub fn new(kind: JobType, unit: UnitType) -> Self {
        Self {
            kind,
            unit,
            ..Self::default()
        }
    }
}

/// Directed route key. `A-B` and `B-A` are distinct legs.
///
/// Serializes as the `"FROM-TO"` string the renderer contract expects,
/// which also makes it usable as a JSON map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegKey {
    pub from: String,
    pub to: String,
}

impl LegKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for LegKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for LegKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once('-')
            .ok_or_else(|| format!("leg key `{s}` is not of the form FROM-TO"))?;
        Ok(Self::new(from, to))
    }
}

impl Serialize for LegKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LegKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Accept a threshold as a number, a numeric string, or anything else.
/// Blank and malformed values disable the check instead of failing the
/// whole configuration.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}
