use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;

use crate::model::{LoadStatus, Model, Station};

pub const STATUS_LOADING: &str = "Fetching station data...";
pub const STATUS_READY: &str = "Ready";
pub const LOAD_FAILED_FALLBACK: &str = "Unable to load station data.";
pub const ERROR_HINT: &str =
    "We could not reach the station feed. Check your connection and try again.";
pub const SUMMARY_WAITING: &str = "Waiting for data...";
pub const SUMMARY_REGION: &str = "Germany";
pub const EMPTY_FILTER_RESULT: &str = "No stations match this filter.";
pub const OVERLAY_LOADING: &str = "Loading stations...";
pub const OVERLAY_UNAVAILABLE: &str = "Map ready. Station data unavailable.";

pub const DEFAULT_CENTER: MapPoint = MapPoint {
    lat: 51.1657,
    lng: 10.4515,
};
pub const DEFAULT_ZOOM: f64 = 6.0;
pub const FOCUS_ZOOM: f64 = 12.0;

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
}

impl From<&Station> for MapPoint {
    fn from(station: &Station) -> Self {
        Self {
            lat: station.lat,
            lng: station.lng,
        }
    }
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct MapFocus {
    pub center: MapPoint,
    pub zoom: f64,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MapView {
    pub focus: MapFocus,
    pub markers: FeatureCollection,
    pub highlight: Option<MapPoint>,
    pub overlay: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct FilterView {
    pub value: String,
    pub enabled: bool,
    pub clearable: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub status: LoadStatus,
    pub error_message: Option<String>,
    pub status_copy: String,
    pub error_hint: Option<String>,
    pub retry_available: bool,

    pub cities: Vec<String>,
    pub filter: FilterView,
    pub visible_stations: Vec<Station>,
    pub selected_station: Option<Station>,

    pub station_count: Option<usize>,
    pub city_count: Option<usize>,
    pub summary: String,
    pub empty_message: Option<String>,

    pub map: MapView,
}

impl ViewModel {
    pub fn from_model(model: &Model) -> Self {
        let status = model.status().clone();
        let loaded = status.is_success();
        let visible_stations: Vec<Station> = model.visible_stations().cloned().collect();
        let selected_station = model.selected_station().cloned();

        let error_message = status.error_message().map(str::to_string);
        let status_copy = status_copy(&status);

        let station_count = loaded.then_some(visible_stations.len());
        let city_count = loaded.then_some(model.cities().len());
        let summary = if loaded {
            summary(visible_stations.len(), model.filter())
        } else {
            SUMMARY_WAITING.to_string()
        };
        let empty_message = (loaded && visible_stations.is_empty())
            .then(|| EMPTY_FILTER_RESULT.to_string());

        let map = MapView {
            focus: focus(selected_station.as_ref()),
            markers: markers(&visible_stations, selected_station.as_ref()),
            highlight: selected_station.as_ref().map(MapPoint::from),
            overlay: overlay(&status),
        };

        Self {
            error_hint: status.error_message().map(|_| ERROR_HINT.to_string()),
            retry_available: matches!(status, LoadStatus::Error(_)),
            status,
            error_message,
            status_copy,
            cities: model.cities().to_vec(),
            filter: FilterView {
                value: model.filter().to_string(),
                enabled: loaded,
                clearable: !model.filter().is_empty(),
            },
            visible_stations,
            selected_station,
            station_count,
            city_count,
            summary,
            empty_message,
            map,
        }
    }
}

pub fn status_copy(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Loading => STATUS_LOADING.to_string(),
        LoadStatus::Success => STATUS_READY.to_string(),
        LoadStatus::Error(message) if message.trim().is_empty() => {
            LOAD_FAILED_FALLBACK.to_string()
        }
        LoadStatus::Error(message) => message.clone(),
    }
}

pub fn summary(count: usize, filter: &str) -> String {
    let noun = if count == 1 { "station" } else { "stations" };
    if filter.is_empty() {
        format!("Showing {count} {noun} across {SUMMARY_REGION}.")
    } else {
        format!("Showing {count} {noun} in {filter}.")
    }
}

pub fn focus(selected: Option<&Station>) -> MapFocus {
    match selected {
        Some(station) => MapFocus {
            center: MapPoint::from(station),
            zoom: FOCUS_ZOOM,
        },
        None => MapFocus {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        },
    }
}

fn overlay(status: &LoadStatus) -> Option<String> {
    match status {
        LoadStatus::Loading => Some(OVERLAY_LOADING.to_string()),
        LoadStatus::Error(_) => Some(OVERLAY_UNAVAILABLE.to_string()),
        LoadStatus::Success => None,
    }
}

/// One GeoJSON point per visible station, `[lng, lat]` as GeoJSON wants it.
pub fn markers(stations: &[Station], selected: Option<&Station>) -> FeatureCollection {
    let features = stations
        .iter()
        .map(|station| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), station.name.clone().into());
            properties.insert("city".to_string(), station.city.clone().into());
            properties.insert(
                "selected".to_string(),
                selected.is_some_and(|s| s.id == station.id).into(),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![station.lng, station.lat]))),
                id: Some(Id::Number(station.id.0.into())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}
