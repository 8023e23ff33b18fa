use tracing::{debug, info, trace, warn};

use crate::capabilities::{Capabilities, FetchResult, InFlightLoad, StationFeed};
use crate::derived::DerivedView;
use crate::event::Event;
use crate::model::{LoadStatus, Model, RequestEpoch};
use crate::selection;
use crate::view::ViewModel;

#[derive(Default)]
pub struct App;

impl App {
    /// Starts a fresh load attempt under a new epoch. Replacing the previous
    /// in-flight handle aborts whatever fetch it was guarding.
    fn begin_load(model: &mut Model, caps: &Capabilities) {
        model.epoch = model.epoch.next();
        model.status = LoadStatus::Loading;

        let epoch = model.epoch;
        let (load, registration) = InFlightLoad::start(epoch);
        if let Some(previous) = model.in_flight.replace(load) {
            debug!(
                superseded = previous.epoch().value(),
                epoch = epoch.value(),
                "superseding station fetch"
            );
        }

        let feed = StationFeed::new(caps.http.clone(), model.feed.endpoint.clone());
        debug!(
            epoch = epoch.value(),
            host = model.feed.endpoint.host(),
            "loading stations"
        );

        caps.compose.spawn(move |context| async move {
            let outcome = feed.load(registration).await;
            context.update_app(Event::StationsLoaded { epoch, outcome });
        });
    }

    /// Returns true when the result changed observable state.
    fn apply_load_result(model: &mut Model, epoch: RequestEpoch, outcome: FetchResult) -> bool {
        if outcome.as_ref().is_err_and(|error| !error.is_user_visible()) {
            debug!(epoch = epoch.value(), "station fetch cancelled");
            return false;
        }

        if epoch != model.epoch {
            debug!(
                epoch = epoch.value(),
                current = model.epoch.value(),
                "discarding stale station result"
            );
            return false;
        }

        if let Some(load) = model.in_flight.take() {
            load.settle();
        }

        match outcome {
            Ok(stations) => {
                model.stations = stations;
                model.status = LoadStatus::Success;
                model.derived = DerivedView::compute(&model.stations, &model.filter);
                Self::guard_selection(model);

                info!(
                    epoch = epoch.value(),
                    stations = model.stations.len(),
                    cities = model.derived.cities().len(),
                    "stations loaded"
                );
            }
            Err(error) => {
                warn!(epoch = epoch.value(), error = %error, "station fetch failed");
                model.status = LoadStatus::Error(error.user_message());
            }
        }

        true
    }

    fn change_filter(model: &mut Model, value: String) -> bool {
        if value == model.filter {
            trace!(filter = %value, "filter unchanged");
            return false;
        }

        model.filter = value;
        model.derived.refilter(&model.stations, &model.filter);
        Self::guard_selection(model);
        true
    }

    fn guard_selection(model: &mut Model) {
        let kept = selection::guard(model.selection, model.derived.visible(&model.stations));
        if kept != model.selection {
            debug!(
                cleared = ?model.selection.map(|id| id.0),
                filter = %model.filter,
                "selection no longer visible"
            );
            model.selection = kept;
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        let event_name = event.name();
        trace!(event = event_name, epoch = model.epoch.value(), "update");

        if event.is_user_initiated() {
            debug!(event = event_name, "user action");
        }

        match event {
            Event::ViewMounted => {
                if model.in_flight.is_some() {
                    debug!(epoch = model.epoch.value(), "already loading, mount ignored");
                    return;
                }
                Self::begin_load(model, caps);
                caps.render.render();
            }

            Event::ViewUnmounted => {
                if let Some(load) = model.in_flight.take() {
                    debug!(epoch = load.epoch().value(), "view unmounted mid-fetch");
                }
            }

            Event::FeedConfigured { config } => {
                debug!(host = config.endpoint.host(), "feed endpoint configured");
                model.feed = config;
            }

            Event::RetryRequested => {
                Self::begin_load(model, caps);
                caps.render.render();
            }

            Event::StationsLoaded { epoch, outcome } => {
                if Self::apply_load_result(model, epoch, outcome) {
                    caps.render.render();
                }
            }

            Event::FilterChanged { value } => {
                if Self::change_filter(model, value) {
                    caps.render.render();
                }
            }

            Event::FilterCleared => {
                if Self::change_filter(model, String::new()) {
                    caps.render.render();
                }
            }

            Event::StationSelected { id } => {
                model.selection = Some(id);
                Self::guard_selection(model);
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from_model(model)
    }
}
