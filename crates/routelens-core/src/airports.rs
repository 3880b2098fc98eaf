//! Read-only airport reference data.
//!
//! The index is external data the core only queries; acquisition and
//! maintenance of the records live outside this crate.

use crate::error::Error;
use crate::spatial::Coord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Airport classification, used by the renderer to pick a marker glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AirportClass {
    Civil,
    Military,
    Water,
}

/// One airport reference record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub class: AirportClass,
}

impl AirportRecord {
    pub fn new(lat: f64, lon: f64, class: AirportClass) -> Self {
        Self { lat, lon, class }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.lat, self.lon)
    }
}

/// Lookup table from airport code to its record. Read-only after
/// construction; safe to share across invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirportIndex {
    records: HashMap<String, AirportRecord>,
}

impl AirportIndex {
    pub fn new(records: HashMap<String, AirportRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record, failing when the code is absent.
    pub fn lookup(&self, code: &str) -> Result<&AirportRecord, Error> {
        self.records
            .get(code)
            .ok_or_else(|| Error::unknown_airport(code))
    }

    /// Coordinates for a code; the common access path for geometry.
    pub fn coord(&self, code: &str) -> Result<Coord, Error> {
        self.lookup(code).map(AirportRecord::coord)
    }
}

impl FromIterator<(String, AirportRecord)> for AirportIndex {
    fn from_iter<I: IntoIterator<Item = (String, AirportRecord)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
