mod common;

use crux_core::testing::Update;
use crux_http::protocol::{HttpResponse, HttpResult};
use serde_json::json;
use shared::{Effect, Event, FetchError, LoadStatus, Model, RequestEpoch};

use common::{complete, ok_response, start, Tester};

fn cancelled(event: &Event) -> bool {
    matches!(
        event,
        Event::StationsLoaded {
            outcome: Err(FetchError::Cancelled),
            ..
        }
    )
}

#[test]
fn test_retry_while_loading_discards_previous_result() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut first = start(&app, Event::ViewMounted, &mut model);
    assert_eq!(model.epoch(), RequestEpoch::new(1));

    let Update { effects, events } = app.update(Event::RetryRequested, &mut model);
    assert_eq!(model.epoch(), RequestEpoch::new(2));
    assert!(effects.iter().any(Effect::is_http));
    assert!(events.iter().any(cancelled));

    for event in events {
        let after = app.update(event, &mut model);
        assert!(after.effects.is_empty());
    }
    assert_eq!(model.status(), &LoadStatus::Loading);
    assert!(model.is_fetching());

    let late = complete(&app, &mut first, ok_response(), &mut model);
    assert!(late.is_empty());
    assert_eq!(model.status(), &LoadStatus::Loading);
    assert!(model.stations().is_empty());
}

#[test]
fn test_newer_load_wins_over_older() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut first = start(&app, Event::ViewMounted, &mut model);
    let mut second = start(&app, Event::RetryRequested, &mut model);

    let only_berlin = HttpResult::Ok(
        HttpResponse::ok()
            .json(json!([
                { "id": 1, "name": "Berlin Hbf", "city": "Berlin", "lat": 52.5251, "lng": 13.3694 }
            ]))
            .build(),
    );
    complete(&app, &mut second, only_berlin, &mut model);
    assert_eq!(model.status(), &LoadStatus::Success);
    assert_eq!(model.stations().len(), 1);

    complete(&app, &mut first, ok_response(), &mut model);
    assert_eq!(model.stations().len(), 1);
    assert_eq!(model.cities(), &["Berlin"]);
}

#[test]
fn test_stale_failure_does_not_override_success() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut first = start(&app, Event::ViewMounted, &mut model);
    let mut second = start(&app, Event::RetryRequested, &mut model);
    complete(&app, &mut second, ok_response(), &mut model);

    complete(
        &app,
        &mut first,
        HttpResult::Ok(HttpResponse::status(500).build()),
        &mut model,
    );
    assert_eq!(model.status(), &LoadStatus::Success);

    let stale = app.update(
        Event::StationsLoaded {
            epoch: RequestEpoch::new(1),
            outcome: Err(FetchError::Http(500)),
        },
        &mut model,
    );
    assert!(stale.effects.is_empty());
    assert_eq!(model.status(), &LoadStatus::Success);
}

#[test]
fn test_unmount_cancels_in_flight_fetch() {
    let app = Tester::default();
    let mut model = Model::default();

    let mut request = start(&app, Event::ViewMounted, &mut model);
    let update = app.update(Event::ViewUnmounted, &mut model);

    assert!(!model.is_fetching());
    assert!(update.events.iter().any(cancelled));
    for event in update.events {
        let after = app.update(event, &mut model);
        assert!(after.effects.is_empty());
    }
    assert_eq!(model.status(), &LoadStatus::Loading);

    let late = complete(&app, &mut request, ok_response(), &mut model);
    assert!(late.is_empty());
    assert!(model.stations().is_empty());
}

#[test]
fn test_remount_after_unmount_starts_new_epoch() {
    let app = Tester::default();
    let mut model = Model::default();

    start(&app, Event::ViewMounted, &mut model);
    app.update(Event::ViewUnmounted, &mut model);

    let mut request = start(&app, Event::ViewMounted, &mut model);
    assert_eq!(model.epoch(), RequestEpoch::new(2));

    complete(&app, &mut request, ok_response(), &mut model);
    assert_eq!(model.status(), &LoadStatus::Success);
}
