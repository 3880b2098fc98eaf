//! Per-job filter evaluation.
//!
//! All checks are pure AND conditions: any failure rejects the job.
//! Cheap field comparisons run before the trigonometry.

use crate::models::{FilterConfig, Job};
use crate::spatial::{self, Coord};

/// Anchor coordinates resolved once per invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anchors {
    pub origin: Option<Coord>,
    pub dest: Option<Coord>,
}

/// Decide whether one job qualifies under `config`.
///
/// `from`/`to` are the job's endpoint coordinates, already resolved
/// against the airport index. Angle boundaries are inclusive: a deviation
/// exactly at the configured maximum still passes.
pub fn accept(job: &Job, from: Coord, to: Coord, anchors: &Anchors, config: &FilterConfig) -> bool {
    // Non-paying jobs never qualify.
    if job.pay <= 0.0 {
        return false;
    }
    if job.kind != config.kind {
        return false;
    }
    if job.unit != config.unit {
        return false;
    }
    if let Some(cap) = config.max_amount {
        if job.amount > cap {
            return false;
        }
    }

    // Directional checks relative to the origin anchor. The job must head
    // toward (ratio), start near (max_dist), and continue the anchor->origin
    // approach (max_angle).
    if let Some(anchor) = anchors.origin {
        let rules = &config.origin_rules;
        if let Some(ratio) = rules.dist_ratio {
            let near = spatial::haversine_distance_m(anchor, from);
            // Anchor sitting on the endpoint makes the ratio undefined;
            // the check passes rather than dividing by zero (see DESIGN.md).
            if near > 0.0 && spatial::haversine_distance_m(anchor, to) / near < ratio {
                return false;
            }
        }
        if let Some(max_dist) = rules.max_dist {
            if spatial::distance(anchor, from, config.distance_unit) > max_dist {
                return false;
            }
        }
        if let Some(max_angle) = rules.max_angle_deg {
            let track = spatial::rhumb_bearing_deg(from, to);
            let approach = spatial::rhumb_bearing_deg(anchor, from);
            if spatial::angular_deviation_deg(track, approach) > max_angle {
                return false;
            }
        }
    }

    // Mirror image for the destination anchor: the job must head toward it,
    // end near it, and track along the destination->anchor departure.
    if let Some(anchor) = anchors.dest {
        let rules = &config.dest_rules;
        if let Some(ratio) = rules.dist_ratio {
            let near = spatial::haversine_distance_m(anchor, to);
            if near > 0.0 && spatial::haversine_distance_m(anchor, from) / near < ratio {
                return false;
            }
        }
        if let Some(max_dist) = rules.max_dist {
            if spatial::distance(anchor, to, config.distance_unit) > max_dist {
                return false;
            }
        }
        if let Some(max_angle) = rules.max_angle_deg {
            let track = spatial::rhumb_bearing_deg(from, to);
            let departure = spatial::rhumb_bearing_deg(to, anchor);
            if spatial::angular_deviation_deg(track, departure) > max_angle {
                return false;
            }
        }
    }

    if let Some(heading) = &config.heading {
        if let Some(max_deviation) = heading.max_deviation_deg {
            let track = spatial::rhumb_bearing_deg(from, to);
            if spatial::angular_deviation_deg(track, heading.target_deg) > max_deviation {
                return false;
            }
        }
    }

    if config.min_route_dist.is_some() || config.max_route_dist.is_some() {
        let route = spatial::distance(from, to, config.distance_unit);
        if config.min_route_dist.is_some_and(|min| route < min) {
            return false;
        }
        if config.max_route_dist.is_some_and(|max| route > max) {
            return false;
        }
    }

    true
}
