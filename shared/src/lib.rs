// lib.rs - Station Atlas shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod derived;
pub mod event;
pub mod model;
pub mod selection;
pub mod view;

pub use app::App;
pub use capabilities::{Capabilities, Effect, EffectFfi, FetchError, FetchResult};
pub use config::{ConfigError, FeedConfig, FeedEndpoint, DEFAULT_FEED_URL};
pub use crux_core::{bridge::Bridge, App as CruxApp, Core, Request};
pub use event::Event;
pub use model::{LoadStatus, Model, RequestEpoch, Station, StationId};
pub use view::{FilterView, MapFocus, MapPoint, MapView, ViewModel};
