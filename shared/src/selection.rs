use crate::model::{Station, StationId};

/// Keeps a selection only while the station is visible. Returns the
/// selection that should stand after the visible set or the selection changed.
pub fn guard<'a, I>(selection: Option<StationId>, visible: I) -> Option<StationId>
where
    I: IntoIterator<Item = &'a Station>,
{
    let id = selection?;
    visible
        .into_iter()
        .any(|station| station.id == id)
        .then_some(id)
}

pub fn resolve(selection: Option<StationId>, stations: &[Station]) -> Option<&Station> {
    let id = selection?;
    stations.iter().find(|station| station.id == id)
}
