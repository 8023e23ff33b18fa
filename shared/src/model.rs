use serde::{Deserialize, Serialize};
use std::fmt;

use crate::capabilities::InFlightLoad;
use crate::config::FeedConfig;
use crate::derived::DerivedView;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct StationId(pub i64);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One record of the station feed. Coordinates are passed through untouched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Loading,
    Success,
    Error(String),
}

impl LoadStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Tag for one load attempt. Only the result carrying the current epoch is
/// ever applied.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Wraps at `u64::MAX` so a new epoch always differs from the one
    /// before it.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub(crate) status: LoadStatus,
    pub(crate) stations: Vec<Station>,
    pub(crate) filter: String,
    pub(crate) selection: Option<StationId>,
    pub(crate) epoch: RequestEpoch,
    pub(crate) in_flight: Option<InFlightLoad>,
    pub(crate) derived: DerivedView,
    pub(crate) feed: FeedConfig,
}

impl Model {
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn selection(&self) -> Option<StationId> {
        self.selection
    }

    pub fn epoch(&self) -> RequestEpoch {
        self.epoch
    }

    /// True while a fetch for the current epoch is still outstanding.
    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn cities(&self) -> &[String] {
        self.derived.cities()
    }

    pub fn visible_stations(&self) -> impl Iterator<Item = &Station> + '_ {
        self.derived.visible(&self.stations)
    }

    /// Looked up in the full collection, not the filtered one.
    pub fn selected_station(&self) -> Option<&Station> {
        crate::selection::resolve(self.selection, &self.stations)
    }
}
