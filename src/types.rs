//! Request and response entities of the Routific JSON contract.
//!
//! Field names follow the wire format exactly. Optional fields are `Option`
//! and are left out of the serialized body when absent, so an explicit zero
//! (a capacity of 0, `balance: false`) always reaches the service.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::polyline::{Polyline, PolylineError};

/// A geographic point, optionally tagged with an id to correlate depots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            id: None,
            name: None,
            lat,
            lng,
        }
    }

    pub fn named(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(lat, lng)
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One "hh:mm" window during which a visit may be served.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Capacity demand: a single quantity or named dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Load {
    Quantity(f64),
    Dimensions(BTreeMap<String, f64>),
}

/// Loosely shaped payload accepted by `breaks` and `customNotes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Annotation {
    Number(f64),
    Flag(bool),
    Text(String),
    List(Vec<Annotation>),
    Fields(BTreeMap<String, Annotation>),
}

/// A single-location stop request in a [`VrPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Service time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<Load>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_windows: Option<Vec<TimeWindow>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(
        rename = "customNotes",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_notes: Option<Annotation>,
}

impl Visit {
    pub fn at(location: Location) -> Self {
        Self {
            location,
            start: None,
            end: None,
            duration: None,
            load: None,
            kind: None,
            priority: None,
            time_windows: None,
            notes: None,
            custom_notes: None,
        }
    }
}

/// A vehicle or driver in the fleet. Shared by both plan kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_start: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_visits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaks: Option<Annotation>,
}

impl Vehicle {
    /// A vehicle that starts and ends its shift at `depot`.
    pub fn round_trip(depot: Location) -> Self {
        Self {
            start_location: Some(depot.clone()),
            end_location: Some(depot),
            ..Self::default()
        }
    }
}

/// Pickup or dropoff half of a [`PickDropOrder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl Destination {
    pub fn at(location: Location) -> Self {
        Self {
            location,
            start: None,
            end: None,
            duration: None,
        }
    }
}

/// A paired pickup and dropoff in a [`PdPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickDropOrder {
    pub pickup: Destination,
    pub dropoff: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<Load>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traffic {
    Faster,
    Fast,
    Normal,
    Slow,
    #[serde(rename = "very slow")]
    VerySlow,
}

/// Tuning switches for the optimizer. Everything is absent by default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic: Option<Traffic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_visits_per_vehicle: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_balance_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_vehicles: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortest_distance: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_durations: Option<u32>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vehicle_overtime: Option<u32>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visit_lateness: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polylines: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_tolls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geocoder: Option<String>,
}

/// Vehicle routing request: visits keyed by id plus the fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VrPlan {
    pub visits: BTreeMap<String, Visit>,
    pub fleet: BTreeMap<String, Vehicle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

/// Pickup-and-delivery request: orders keyed by id plus the fleet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdPlan {
    pub visits: BTreeMap<String, PickDropOrder>,
    pub fleet: BTreeMap<String, Vehicle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Pickup,
    Dropoff,
}

/// One waypoint of a computed route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
    /// `None` for a plain stop.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StopKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub too_late: Option<bool>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late_by: Option<f64>,
}

/// The optimized result for a plan.
///
/// `status`, the travel/idle totals, `num_unserved`, `unserved` and
/// `solution` are always part of the wire form. The service sends `null`
/// for an empty `unserved` map, which parses as an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub status: String,
    /// Minutes.
    pub total_travel_time: f64,
    /// Minutes.
    pub total_idle_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<f64>,
    pub num_unserved: u32,
    /// Unserved visit id mapped to the reason it was dropped.
    #[serde(default, deserialize_with = "null_as_default")]
    pub unserved: BTreeMap<String, String>,
    /// Vehicle id mapped to its ordered stops.
    #[serde(default, deserialize_with = "null_as_default")]
    pub solution: BTreeMap<String, Vec<Stop>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_late_visits: Option<u32>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_visit_lateness: Option<f64>,
    /// Vehicle id mapped to its overtime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_overtime: Option<BTreeMap<String, f64>>,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_overtime: Option<f64>,
    /// Vehicle id mapped to encoded route geometry, sent when
    /// [`Options::polylines`] was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polylines: Option<BTreeMap<String, Vec<String>>>,
}

impl Schedule {
    /// Ordered stops assigned to `vehicle_id`.
    pub fn route(&self, vehicle_id: &str) -> Option<&[Stop]> {
        self.solution.get(vehicle_id).map(Vec::as_slice)
    }

    pub fn is_fully_served(&self) -> bool {
        self.num_unserved == 0 && self.unserved.is_empty()
    }

    /// Decode the route geometry returned for `vehicle_id`.
    ///
    /// Returns `None` when the service sent no polylines for that vehicle.
    pub fn route_polylines(
        &self,
        vehicle_id: &str,
    ) -> Option<Result<Vec<Polyline>, PolylineError>> {
        let encoded = self.polylines.as_ref()?.get(vehicle_id)?;
        Some(encoded.iter().map(|line| Polyline::decode(line)).collect())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
