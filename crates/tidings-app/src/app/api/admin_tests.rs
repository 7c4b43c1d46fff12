//! Handler tests for the admin API and its guard.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use serde_json::{Value, json};

use super::test_support::{
    TestApp, app, app_with, booking_body, event_body, news_body, single_user, url,
};
use crate::config::{AuthMethod, BasicAuthConfig, ProxyAuthConfig};
use tidings_service::auth::password::hash_password;

async fn post(app: &TestApp, path: &str, body: &Value) -> Value {
    let mut resp = TestClient::post(url(path))
        .json(body)
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::CREATED));
    resp.take_json::<Value>().await.unwrap()
}

async fn get_json(app: &TestApp, path: &str) -> Value {
    let mut resp = TestClient::get(url(path)).send(&app.service).await;
    assert_eq!(resp.status_code, Some(StatusCode::OK), "GET {path}");
    resp.take_json::<Value>().await.unwrap()
}

#[test_log::test(tokio::test)]
async fn test_proxy_guard() {
    let mut auth = single_user();
    auth.method = AuthMethod::Proxy;
    auth.proxy = Some(ProxyAuthConfig {
        header: "X-Remote-User".to_string(),
    });
    let app = app_with(auth);

    let mut resp = TestClient::get(url("/admin/dashboard"))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::UNAUTHORIZED));
    assert_eq!(
        resp.take_json::<Value>().await.unwrap()["error"],
        "not_authenticated"
    );

    let resp = TestClient::get(url("/admin/dashboard"))
        .add_header("X-Remote-User", "ifeoma", true)
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));

    let resp = TestClient::get(url("/events/upcoming"))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
}

#[test_log::test(tokio::test)]
async fn test_basic_auth_guard() {
    let mut auth = single_user();
    auth.method = AuthMethod::BasicAuth;
    auth.basic_auth = Some(BasicAuthConfig {
        username: "desk".to_string(),
        password_hash: hash_password("correct horse").unwrap(),
    });
    let app = app_with(auth);

    let resp = TestClient::get(url("/admin/content"))
        .add_header(
            "Authorization",
            format!("Basic {}", STANDARD.encode("desk:wrong")),
            true,
        )
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::UNAUTHORIZED));
    assert!(resp.headers().contains_key("www-authenticate"));

    let resp = TestClient::get(url("/admin/content"))
        .add_header(
            "Authorization",
            format!("Basic {}", STANDARD.encode("desk:correct horse")),
            true,
        )
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
}

#[test_log::test(tokio::test)]
async fn test_news_crud() {
    let app = app();
    let created = post(&app, "/admin/news", &news_body("Draft", false)).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(created["publishedAt"].is_null());

    let fetched = get_json(&app, &format!("/admin/news/{id}")).await;
    assert_eq!(fetched["views"], 0);

    let mut resp = TestClient::put(url(&format!("/admin/news/{id}")))
        .json(&news_body("Final", true))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let updated = resp.take_json::<Value>().await.unwrap();
    assert_eq!(updated["title"], "Final");
    assert!(updated["publishedAt"].is_string());

    let mut resp = TestClient::put(url(&format!("/admin/news/{id}")))
        .json(&json!({"title": "", "shortDescription": "", "author": "Desk"}))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
    assert_eq!(
        resp.take_json::<Value>().await.unwrap()["error"],
        "validation_error"
    );

    let resp = TestClient::delete(url(&format!("/admin/news/{id}")))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::NO_CONTENT));
    let resp = TestClient::delete(url(&format!("/admin/news/{id}")))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::NOT_FOUND));
}

#[test_log::test(tokio::test)]
async fn test_event_update_and_delete() {
    let app = app();
    let created = post(&app, "/admin/events", &event_body("Demo day", "coming_soon", "2099-04-04")).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["isUpcoming"], true);
    post(&app, &format!("/events/{id}/bookings"), &booking_body("guest@example.org")).await;

    let mut resp = TestClient::put(url(&format!("/admin/events/{id}")))
        .json(&event_body("Demo day", "past_event", "2099-04-04"))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    let updated = resp.take_json::<Value>().await.unwrap();
    assert_eq!(updated["lifecycle"], "past_event");
    assert_eq!(updated["isUpcoming"], false);

    let resp = TestClient::delete(url(&format!("/admin/events/{id}")))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::NO_CONTENT));
    let bookings = get_json(&app, "/admin/bookings").await;
    assert_eq!(bookings["total"], 0);
}

#[test_log::test(tokio::test)]
async fn test_content_filter() {
    let app = app();
    post(&app, "/admin/news", &news_body("Solar workshop recap", false)).await;
    post(&app, "/admin/events", &event_body("Solar workshop", "coming_soon", "2099-02-02")).await;
    post(&app, "/admin/events", &event_body("Code retreat", "past_event", "2020-02-02")).await;

    let all = get_json(&app, "/admin/content").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let solar = get_json(&app, "/admin/content?search=SOLAR").await;
    assert_eq!(solar.as_array().unwrap().len(), 2);

    let solar_events = get_json(&app, "/admin/content?search=solar&category=events").await;
    assert_eq!(solar_events.as_array().unwrap().len(), 1);
    assert_eq!(solar_events[0]["contentType"], "event");

    let past = get_json(&app, "/admin/content?category=past").await;
    assert_eq!(past[0]["title"], "Code retreat");

    let resp = TestClient::get(url("/admin/content?category=archived"))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));
}

#[test_log::test(tokio::test)]
async fn test_booking_admin_and_dashboard() {
    let app = app();
    let event = post(&app, "/admin/events", &event_body("Hackathon", "coming_soon", "2099-07-07")).await;
    let event_id = event["id"].as_str().unwrap().to_string();
    let path = format!("/events/{event_id}/bookings");
    let first = post(&app, &path, &booking_body("one@example.org")).await;
    post(&app, &path, &booking_body("two@example.org")).await;

    let mut resp = TestClient::put(url(&format!("/admin/bookings/{}/status", first["id"].as_str().unwrap())))
        .json(&json!({"status": "cancelled"}))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::OK));
    assert_eq!(resp.take_json::<Value>().await.unwrap()["status"], "cancelled");

    let resp = TestClient::put(url(&format!("/admin/bookings/{}/status", first["id"].as_str().unwrap())))
        .json(&json!({"status": "archived"}))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::BAD_REQUEST));

    let pending = get_json(&app, &format!("/admin/bookings?event_id={event_id}&status=pending")).await;
    assert_eq!(pending["total"], 1);
    assert_eq!(pending["items"][0]["email"], "two@example.org");

    post(&app, &path, &booking_body("one@example.org")).await;

    let mut resp = TestClient::put(url(&format!("/admin/bookings/{}/status", first["id"].as_str().unwrap())))
        .json(&json!({"status": "pending"}))
        .send(&app.service)
        .await;
    assert_eq!(resp.status_code, Some(StatusCode::CONFLICT));
    assert_eq!(
        resp.take_json::<Value>().await.unwrap()["error"],
        "duplicate_registration"
    );

    let stats = get_json(&app, "/admin/dashboard").await;
    assert_eq!(stats["eventsTotal"], 1);
    assert_eq!(stats["eventsUpcoming"], 1);
    assert_eq!(stats["bookingsPending"], 2);
    assert_eq!(stats["bookingsCancelled"], 1);
    assert_eq!(stats["refreshIntervalMs"], 2000);
}
