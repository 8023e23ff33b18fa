//! Capabilities of the station core. Render and compose are Crux built-ins,
//! HTTP comes from crux_http.

mod stations;

pub use self::stations::{
    decode_stations, FetchError, FetchResult, InFlightLoad, StationFeed, UNKNOWN_ERROR,
};

pub use crux_core::compose::Compose;
pub use crux_core::render::Render;
pub use crux_http::Http;

use crux_core::capability::{Never, ProtoContext};
use crux_core::render::RenderOperation;
use crux_core::Request;
use crux_http::protocol::HttpRequest;
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::event::Event;

pub type AppHttp = Http<Event>;
pub type AppRender = Render<Event>;
pub type AppCompose = Compose<Event>;

pub struct Capabilities {
    pub http: AppHttp,
    pub render: AppRender,
    pub compose: AppCompose,
}

/// Side effects the shell has to carry out. Compose never reaches the shell,
/// so it has no variant here.
#[derive(Debug)]
pub enum Effect {
    Http(Request<HttpRequest>),
    Render(Request<RenderOperation>),
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "Effect")]
pub enum EffectFfi {
    Http(HttpRequest),
    Render(RenderOperation),
}

impl crux_core::Effect for Effect {
    type Ffi = EffectFfi;

    fn serialize(self) -> (Self::Ffi, crux_core::bridge::ResolveSerialized) {
        match self {
            Effect::Http(request) => request.serialize(EffectFfi::Http),
            Effect::Render(request) => request.serialize(EffectFfi::Render),
        }
    }
}

impl crux_core::WithContext<App, Effect> for Capabilities {
    fn new_with_context(context: ProtoContext<Effect, Event>) -> Capabilities {
        Capabilities {
            http: Http::new(context.specialize(Effect::Http)),
            render: Render::new(context.specialize(Effect::Render)),
            compose: Compose::new(
                context.specialize(|request: Request<Never>| match request.operation {}),
            ),
        }
    }
}

impl Effect {
    pub fn is_http(&self) -> bool {
        matches!(self, Effect::Http(_))
    }

    pub fn into_http(self) -> Option<Request<HttpRequest>> {
        match self {
            Effect::Http(request) => Some(request),
            Effect::Render(_) => None,
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, Effect::Render(_))
    }
}
