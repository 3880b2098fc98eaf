//! Pure helpers for the external renderer.
//!
//! No drawing and no styling tables live here: these functions turn
//! engine output into opaque keys and numbers the renderer resolves
//! however it likes.

use crate::airports::AirportIndex;
use crate::error::Error;
use crate::models::FilterConfig;
use crate::spatial::{self, Compass};

/// Marker emphasis tier. Selected anchors outrank rentable bases, which
/// outrank plain airports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerTier {
    Base,
    Rentable,
    Selected,
}

/// Pick the emphasis tier for one airport marker.
pub fn marker_tier(code: &str, config: &FilterConfig) -> MarkerTier {
    if config.origin.as_deref() == Some(code) || config.dest.as_deref() == Some(code) {
        MarkerTier::Selected
    } else if config.rentable_bases.contains(code) {
        MarkerTier::Rentable
    } else {
        MarkerTier::Base
    }
}

/// Stroke weight for a leg, interpolated linearly between `base_weight`
/// and `max_weight` by where `amount` sits between the promotion minimum
/// and the heaviest finalized leg.
pub fn leg_weight(amount: u32, min: u32, max_amount: u32, base_weight: f64, max_weight: f64) -> f64 {
    let min = min.max(1);
    if max_amount <= min {
        return max_weight;
    }
    let t = (amount.saturating_sub(min)) as f64 / (max_amount - min) as f64;
    t.clamp(0.0, 1.0) * (max_weight - base_weight) + base_weight
}

/// Compass label from an airport toward a rentable vehicle's home base,
/// shown next to the return bonus. `None` when the vehicle is already
/// home.
pub fn bonus_direction(
    airports: &AirportIndex,
    code: &str,
    home: &str,
) -> Result<Option<Compass>, Error> {
    if code == home {
        return Ok(None);
    }
    let from = airports.coord(code)?;
    let to = airports.coord(home)?;
    Ok(Some(spatial::compass_bucket(from, to)))
}
