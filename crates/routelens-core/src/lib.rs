//! Job-to-route filtering and aggregation.
//!
//! Given a snapshot of point-to-point jobs and a set of geographic and
//! economic filter criteria, decide which jobs qualify, group them into
//! directed legs, and report the airports a renderer must display along
//! with the maximum accumulated leg volume.

pub mod airports;
pub mod display;
pub mod engine;
pub mod error;
pub mod legs;
pub mod models;
pub mod predicate;
pub mod spatial;

pub use airports::{AirportClass, AirportIndex, AirportRecord};
pub use display::{bonus_direction, leg_weight, marker_tier, MarkerTier};
pub use engine::{run, FilterOutput};
pub use error::Error;
pub use legs::{Leg, LegAggregator, LegGeometry};
pub use models::{AnchorRules, FilterConfig, HeadingRule, Job, JobType, LegKey, UnitType};
pub use predicate::{accept, Anchors};
pub use spatial::{
    angular_deviation_deg, compass_bucket, distance, haversine_distance_m, rhumb_bearing_deg,
    Compass, Coord, DistanceUnit,
};
