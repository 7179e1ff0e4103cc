mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::TestApp;
use serde_json::Value;
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn feed(events: &[(&str, &str, Option<&str>)]) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "PRODID:-//Airbnb Inc//Hosting Calendar 1.0//EN".to_string(),
    ];
    for (i, (start, end, summary)) in events.iter().enumerate() {
        lines.push("BEGIN:VEVENT".to_string());
        lines.push(format!("DTSTART;VALUE=DATE:{}", start));
        lines.push(format!("DTEND;VALUE=DATE:{}", end));
        if let Some(summary) = summary {
            lines.push(format!("SUMMARY:{}", summary));
        }
        lines.push(format!("UID:evt-{}@test", i));
        lines.push("END:VEVENT".to_string());
    }
    lines.push("END:VCALENDAR".to_string());
    lines.join("\r\n") + "\r\n"
}

async fn sync(app: &TestApp, property_id: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/v1/sync/{}", property_id))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_sync_populates_ledger_from_feed() {
    let app = TestApp::new().await;
    app.seed_property("prop_a", Some("https://feeds.test/a.ics")).await;
    app.feed.set_feed(
        "https://feeds.test/a.ics",
        &feed(&[("20250310", "20250313", Some("Reserved"))]),
    );

    let res = sync(&app, "prop_a").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["blocked_dates"], 3);

    let check = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/availability/blocked?property_id=prop_a")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(check).await;
    let dates: Vec<&str> = body["blocked_dates"].as_array().unwrap()
        .iter().map(|b| b["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["2025-03-10", "2025-03-11", "2025-03-12"]);
}

#[tokio::test]
async fn test_overlapping_events_count_distinct_dates() {
    let app = TestApp::new().await;
    app.seed_property("prop_a", Some("https://feeds.test/a.ics")).await;
    // The two events share the night of 2025-03-11.
    app.feed.set_feed(
        "https://feeds.test/a.ics",
        &feed(&[
            ("20250310", "20250312", Some("Reserved")),
            ("20250311", "20250313", Some("Reserved")),
        ]),
    );

    let res = sync(&app, "prop_a").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["blocked_dates"], 3);
}

#[tokio::test]
async fn test_resync_replaces_never_merges() {
    let app = TestApp::new().await;
    app.seed_property("prop_a", Some("https://feeds.test/a.ics")).await;

    app.feed.set_feed("https://feeds.test/a.ics", &feed(&[("20250310", "20250313", Some("Reserved"))]));
    assert_eq!(sync(&app, "prop_a").await.status(), StatusCode::OK);

    // Upstream cancelled the March stay and took a May one instead.
    app.feed.set_feed("https://feeds.test/a.ics", &feed(&[("20250501", "20250503", Some("Reserved"))]));
    assert_eq!(sync(&app, "prop_a").await.status(), StatusCode::OK);

    let check = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/availability/blocked?property_id=prop_a")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(check).await;
    let dates: Vec<&str> = body["blocked_dates"].as_array().unwrap()
        .iter().map(|b| b["date"].as_str().unwrap()).collect();
    // No March leftovers survive the replace.
    assert_eq!(dates, vec!["2025-05-01", "2025-05-02"]);
}

#[tokio::test]
async fn test_sync_to_empty_feed_clears_ledger() {
    let app = TestApp::new().await;
    app.seed_property("prop_a", Some("https://feeds.test/a.ics")).await;

    app.feed.set_feed("https://feeds.test/a.ics", &feed(&[("20250310", "20250312", None)]));
    assert_eq!(sync(&app, "prop_a").await.status(), StatusCode::OK);

    app.feed.set_feed("https://feeds.test/a.ics", &feed(&[]));
    let res = sync(&app, "prop_a").await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["blocked_dates"], 0);

    let check = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/availability/blocked?property_id=prop_a")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(check).await["count"], 0);
}

#[tokio::test]
async fn test_unconfigured_property_is_a_distinct_failure() {
    let app = TestApp::new().await;
    app.seed_property("prop_nofeed", None).await;

    let res = sync(&app, "prop_nofeed").await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = parse_body(res).await;
    assert!(body["error"].as_str().unwrap().contains("No iCal feed configured"));
}

#[tokio::test]
async fn test_unknown_property_is_not_found() {
    let app = TestApp::new().await;
    let res = sync(&app, "prop_missing").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_fetch_failure_keeps_existing_ledger() {
    let app = TestApp::new().await;
    app.seed_property("prop_a", Some("https://feeds.test/a.ics")).await;

    app.feed.set_feed("https://feeds.test/a.ics", &feed(&[("20250310", "20250312", None)]));
    assert_eq!(sync(&app, "prop_a").await.status(), StatusCode::OK);

    app.feed.set_failing("https://feeds.test/a.ics");
    let res = sync(&app, "prop_a").await;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    // The failed run must not have wiped the previous ledger.
    let check = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/availability/blocked?property_id=prop_a")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(check).await["count"], 2);
}

#[tokio::test]
async fn test_non_calendar_body_keeps_existing_ledger() {
    let app = TestApp::new().await;
    app.seed_property("prop_a", Some("https://feeds.test/a.ics")).await;

    app.feed.set_feed("https://feeds.test/a.ics", &feed(&[("20250310", "20250312", None)]));
    assert_eq!(sync(&app, "prop_a").await.status(), StatusCode::OK);

    // An upstream error page instead of a feed must not read as "no events".
    app.feed.set_feed("https://feeds.test/a.ics", "<html><body>502 Bad Gateway</body></html>");
    let res = sync(&app, "prop_a").await;
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    let check = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri("/api/v1/availability/blocked?property_id=prop_a")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(check).await["count"], 2);
}

#[tokio::test]
async fn test_sync_all_isolates_per_property_failures() {
    let app = TestApp::new().await;
    app.seed_property("prop_good", Some("https://feeds.test/good.ics")).await;
    app.seed_property("prop_bad", Some("https://feeds.test/bad.ics")).await;
    app.seed_property("prop_silent", None).await;

    app.feed.set_feed("https://feeds.test/good.ics", &feed(&[("20250601", "20250603", None)]));
    app.feed.set_failing("https://feeds.test/bad.ics");

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/sync")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let results = parse_body(res).await;
    let results = results.as_array().unwrap();
    // prop_silent has no feed and is not part of the sync set.
    assert_eq!(results.len(), 2);

    let good = results.iter().find(|r| r["property_id"] == "prop_good").unwrap();
    assert_eq!(good["success"], true);
    assert_eq!(good["blocked_dates"], 2);

    let bad = results.iter().find(|r| r["property_id"] == "prop_bad").unwrap();
    assert_eq!(bad["success"], false);
    assert!(bad["error"].as_str().unwrap().contains("timed out"));
}
