//! Pure derivations over the station list: the city set and the filtered
//! (visible) stations. The model memoizes the result in a `DerivedView` and
//! only recomputes it when the stations or the filter change.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::model::Station;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DerivedView {
    cities: Vec<String>,
    visible: Vec<usize>,
}

impl DerivedView {
    pub fn compute(stations: &[Station], filter: &str) -> Self {
        Self {
            cities: cities(stations),
            visible: visible_indices(stations, filter),
        }
    }

    /// The city set only depends on the stations, so a filter change keeps it.
    pub fn refilter(&mut self, stations: &[Station], filter: &str) {
        self.visible = visible_indices(stations, filter);
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible<'a>(&'a self, stations: &'a [Station]) -> impl Iterator<Item = &'a Station> + 'a {
        self.visible.iter().filter_map(move |&i| stations.get(i))
    }
}

/// Distinct city names, each once, in collation order.
pub fn cities(stations: &[Station]) -> Vec<String> {
    let distinct: BTreeSet<&str> = stations.iter().map(|s| s.city.as_str()).collect();
    let mut cities: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    cities.sort_by(|a, b| compare_cities(a, b));
    cities
}

/// Positions of the stations that pass `filter`, in their original order.
/// An empty filter passes everything.
pub fn visible_indices(stations: &[Station], filter: &str) -> Vec<usize> {
    stations
        .iter()
        .enumerate()
        .filter(|(_, station)| filter.is_empty() || station.city == filter)
        .map(|(i, _)| i)
        .collect()
}

pub fn visible_stations<'a>(stations: &'a [Station], filter: &str) -> Vec<&'a Station> {
    visible_indices(stations, filter)
        .into_iter()
        .map(|i| &stations[i])
        .collect()
}

/// Locale-aware ordering for city names. Letters are compared without case
/// or Latin diacritics first, then accents (plain before accented), then
/// case (lowercase before uppercase).
pub fn compare_cities(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Folds Latin-1 and Latin Extended-A letters to their base letter. Anything
/// outside that table (Greek, Cyrillic, CJK, combining marks) is kept as is
/// and compares by code point.
fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => key.push('a'),
            'ç' | 'ć' | 'č' => key.push('c'),
            'ď' | 'đ' => key.push('d'),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => key.push('e'),
            'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => key.push('i'),
            'ł' => key.push('l'),
            'ñ' | 'ń' | 'ň' => key.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => key.push('o'),
            'ř' => key.push('r'),
            'ś' | 'š' | 'ş' => key.push('s'),
            'ť' | 'ţ' => key.push('t'),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => key.push('u'),
            'ý' | 'ÿ' => key.push('y'),
            'ź' | 'ż' | 'ž' => key.push('z'),
            'ß' => key.push_str("ss"),
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            other => key.push(other),
        }
    }
    key
}
