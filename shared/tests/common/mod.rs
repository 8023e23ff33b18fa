#![allow(dead_code)]

use crux_core::testing::{AppTester, Update};
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use serde_json::json;
use shared::{App, Effect, Event, Model};

pub type Tester = AppTester<App, Effect>;

pub fn feed_body() -> serde_json::Value {
    json!([
        { "id": 1, "name": "Berlin Hbf", "city": "Berlin", "lat": 52.5251, "lng": 13.3694 },
        { "id": 2, "name": "Hamburg Hbf", "city": "Hamburg", "lat": 53.553, "lng": 10.0067 },
        { "id": 3, "name": "Munich Hbf", "city": "Munich", "lat": 48.1402, "lng": 11.5586 }
    ])
}

pub fn ok_response() -> HttpResult {
    HttpResult::Ok(HttpResponse::ok().json(feed_body()).build())
}

pub fn http_request(update: Update<Effect, Event>) -> Request<HttpRequest> {
    update
        .into_effects()
        .find_map(Effect::into_http)
        .expect("expected an HTTP request")
}

/// Dispatches the view event and returns the HTTP request it triggered.
pub fn start(app: &Tester, event: Event, model: &mut Model) -> Request<HttpRequest> {
    http_request(app.update(event, model))
}

/// Resolves the request the way a shell would, then routes the events the
/// load task produced back through the app.
pub fn complete(
    app: &Tester,
    request: &mut Request<HttpRequest>,
    result: HttpResult,
    model: &mut Model,
) -> Vec<Update<Effect, Event>> {
    let update = app.resolve(request, result).expect("request should resolve");
    update
        .events
        .into_iter()
        .map(|event| app.update(event, model))
        .collect()
}

pub fn loaded(app: &Tester) -> Model {
    let mut model = Model::default();
    let mut request = start(app, Event::ViewMounted, &mut model);
    complete(app, &mut request, ok_response(), &mut model);
    model
}
