mod helpers;

use helpers::{api_address, post_form, post_form_to, start_app};

use select::{
    document::Document,
    predicate::{Attr, Class, Name, Predicate},
};
use serde_json::json;
use speculoos::prelude::*;
use std::time::Duration;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_empty_lists(mock_api: &MockServer) {
    for endpoint in ["/api/messages", "/api/history"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(mock_api)
            .await;
    }
}

fn input_value(document: &Document, form_action: &str, name: &str) -> String {
    document
        .find(Name("form").and(Attr("action", form_action)))
        .next()
        .unwrap()
        .find(Name("input").and(Attr("name", name)))
        .next()
        .unwrap()
        .attr("value")
        .unwrap_or("")
        .to_string()
}

fn toast_texts(document: &Document) -> Vec<String> {
    document.find(Class("toast")).map(|toast| toast.text()).collect()
}

#[tokio::test]
async fn send_now_posts_once_and_clears_input() {
    let mock_api = MockServer::start().await;
    mount_empty_lists(&mock_api).await;

    Mock::given(method("POST"))
        .and(path("/api/send-now"))
        .and(body_json(json!({ "content": "https://example.com/launch" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .named("send now")
        .mount(&mock_api)
        .await;

    let response = post_form(
        "/send-now",
        &[("content", "https://example.com/launch")],
        api_address(&mock_api),
    )
    .await
    .expect("Failed to execute request");

    assert!(response.status().is_success());

    let document = Document::from(response.text().await.unwrap().as_str());

    assert_eq!(input_value(&document, "/send-now", "content"), "");
    assert_eq!(
        document.find(Class("toast-success")).next().unwrap().text(),
        "Message sent successfully!"
    );
}

#[tokio::test]
async fn send_now_failure_preserves_input() {
    let mock_api = MockServer::start().await;
    mount_empty_lists(&mock_api).await;

    Mock::given(method("POST"))
        .and(path("/api/send-now"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&mock_api)
        .await;

    let response = post_form(
        "/send-now",
        &[("content", "try again later")],
        api_address(&mock_api),
    )
    .await
    .expect("Failed to execute request");

    assert!(response.status().is_success());

    let document = Document::from(response.text().await.unwrap().as_str());

    assert_eq!(
        input_value(&document, "/send-now", "content"),
        "try again later"
    );
    assert_eq!(
        toast_texts(&document),
        vec!["Failed to send message. Please try again."]
    );
}

#[tokio::test]
async fn send_now_with_blank_content_makes_no_calls() {
    let mock_api = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .named("no posts")
        .mount(&mock_api)
        .await;

    mount_empty_lists(&mock_api).await;

    let response = post_form("/send-now", &[("content", "   ")], api_address(&mock_api))
        .await
        .expect("Failed to execute request");

    let document = Document::from(response.text().await.unwrap().as_str());

    assert_eq!(
        document.find(Class("toast-error")).next().unwrap().text(),
        "Please enter message content"
    );
}

#[tokio::test]
async fn schedule_submits_request_and_lists_new_message() {
    let mock_api = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .and(body_json(json!({
            "content": "hello",
            "send_time": "09:00",
            "start_date": "2024-01-01",
            "loop_daily": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success", "id": 1 })))
        .expect(1)
        .named("schedule")
        .mount(&mock_api)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "content": "hello",
            "send_time": "09:00",
            "start_date": "2024-01-01",
            "end_date": null,
            "loop_daily": 1,
            "status": "active"
        }])))
        .expect(1)
        .mount(&mock_api)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_api)
        .await;

    let response = post_form(
        "/schedule",
        &[
            ("content", "hello"),
            ("send_time", "09:00"),
            ("start_date", "2024-01-01"),
            ("end_date", ""),
            ("loop_daily", "on"),
        ],
        api_address(&mock_api),
    )
    .await
    .expect("Failed to execute request");

    assert!(response.status().is_success());

    let document = Document::from(response.text().await.unwrap().as_str());

    assert_eq!(
        toast_texts(&document),
        vec!["Message scheduled successfully!"]
    );
    assert_eq!(input_value(&document, "/schedule", "content"), "");

    let entry = document
        .find(Name("li").and(Class("scheduled-message")))
        .next()
        .unwrap();
    assert_eq!(entry.attr("data-status").unwrap(), "active");
    assert_that(&entry.text()).contains("hello");
    assert_that(&entry.text()).contains("Daily");
}

#[tokio::test]
async fn schedule_with_bad_time_keeps_form_and_makes_no_post() {
    let mock_api = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&mock_api)
        .await;

    mount_empty_lists(&mock_api).await;

    let response = post_form(
        "/schedule",
        &[
            ("content", "hello"),
            ("send_time", "9am"),
            ("start_date", "2024-01-01"),
        ],
        api_address(&mock_api),
    )
    .await
    .expect("Failed to execute request");

    let document = Document::from(response.text().await.unwrap().as_str());

    assert_eq!(
        toast_texts(&document),
        vec!["Please enter a send time as HH:MM"]
    );
    assert_eq!(input_value(&document, "/schedule", "content"), "hello");
    assert_eq!(input_value(&document, "/schedule", "send_time"), "9am");
}

#[tokio::test]
async fn schedule_failure_reports_and_keeps_form() {
    let mock_api = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_api)
        .await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_api)
        .await;

    let response = post_form(
        "/schedule",
        &[
            ("content", "weekly recap"),
            ("send_time", "17:45"),
            ("start_date", "2024-05-01"),
            ("end_date", "2024-05-31"),
        ],
        api_address(&mock_api),
    )
    .await
    .expect("Failed to execute request");

    let document = Document::from(response.text().await.unwrap().as_str());

    assert_eq!(
        toast_texts(&document),
        vec!["Failed to schedule message. Please try again."]
    );
    assert_eq!(input_value(&document, "/schedule", "end_date"), "2024-05-31");
}

#[tokio::test]
async fn duplicate_send_now_while_in_flight_reaches_backend_once() {
    let mock_api = MockServer::start().await;
    mount_empty_lists(&mock_api).await;

    Mock::given(method("POST"))
        .and(path("/api/send-now"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success" }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .named("send now")
        .mount(&mock_api)
        .await;

    let app_address = start_app(api_address(&mock_api)).await;
    let submit = || post_form_to(&app_address, "/send-now", &[("content", "flash sale")]);

    let (first, second) = tokio::join!(submit(), submit());

    let mut pages = Vec::new();
    for response in [first, second] {
        let response = response.expect("Failed to execute request");
        assert!(response.status().is_success());
        pages.push(Document::from(response.text().await.unwrap().as_str()));
    }

    let (sent, busy): (Vec<_>, Vec<_>) = pages
        .iter()
        .partition(|document| toast_texts(document) == vec!["Message sent successfully!"]);

    assert_eq!(sent.len(), 1);
    assert_eq!(busy.len(), 1);

    let busy = busy[0];
    assert!(toast_texts(busy).is_empty());
    assert_eq!(input_value(busy, "/send-now", "content"), "flash sale");

    let form = busy
        .find(Name("form").and(Attr("action", "/send-now")))
        .next()
        .unwrap();
    assert_eq!(form.attr("aria-busy"), Some("true"));

    let button = form.find(Name("button")).next().unwrap();
    assert!(button.attr("disabled").is_some());
    assert_eq!(button.text().trim(), "Sending...");

    let refresh = busy
        .find(Name("meta").and(Attr("http-equiv", "refresh")))
        .next()
        .unwrap();
    assert_eq!(refresh.attr("content"), Some("2;url=/"));
    assert!(sent[0]
        .find(Name("meta").and(Attr("http-equiv", "refresh")))
        .next()
        .is_none());
}

#[tokio::test]
async fn duplicate_schedule_while_in_flight_reaches_backend_once() {
    let mock_api = MockServer::start().await;
    mount_empty_lists(&mock_api).await;

    Mock::given(method("POST"))
        .and(path("/api/schedule"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "success", "id": 3 }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .named("schedule")
        .mount(&mock_api)
        .await;

    let app_address = start_app(api_address(&mock_api)).await;
    let form = [
        ("content", "standup"),
        ("send_time", "09:30"),
        ("start_date", "2024-06-03"),
    ];
    let submit = || post_form_to(&app_address, "/schedule", &form);

    let (first, second) = tokio::join!(submit(), submit());

    let mut busy_pages = 0;
    for response in [first, second] {
        let body = response.expect("Failed to execute request").text().await.unwrap();
        let document = Document::from(body.as_str());

        let button = document
            .find(Name("form").and(Attr("action", "/schedule")))
            .next()
            .unwrap()
            .find(Name("button"))
            .next()
            .unwrap();

        if button.attr("disabled").is_some() {
            busy_pages += 1;
            assert_eq!(button.text().trim(), "Scheduling...");
            assert_eq!(input_value(&document, "/schedule", "content"), "standup");
        } else {
            assert_eq!(toast_texts(&document), vec!["Message scheduled successfully!"]);
        }
    }

    assert_eq!(busy_pages, 1);
}

#[tokio::test]
async fn forms_lock_themselves_on_submit() {
    let mock_api = MockServer::start().await;
    mount_empty_lists(&mock_api).await;

    let app_address = start_app(api_address(&mock_api)).await;

    let page = reqwest::get(format!("{}/", app_address))
        .await
        .expect("Failed to execute request")
        .text()
        .await
        .unwrap();
    let document = Document::from(page.as_str());

    for (action, label) in [("/send-now", "Sending..."), ("/schedule", "Scheduling...")] {
        let form = document
            .find(Name("form").and(Attr("action", action)))
            .next()
            .unwrap();

        assert_eq!(form.attr("data-busy-label"), Some(label));
        assert!(form.attr("aria-busy").is_none());
        assert!(form.find(Name("button")).next().unwrap().attr("disabled").is_none());
    }

    let script = document
        .find(Name("script"))
        .next()
        .unwrap()
        .attr("src")
        .unwrap()
        .to_string();
    assert_eq!(script, "/assets/dashboard.js");

    let asset = reqwest::get(format!("{}{}", app_address, script))
        .await
        .expect("Failed to fetch script");
    assert!(asset.status().is_success());

    let source = asset.text().await.unwrap();
    assert_that(&source).contains("button.disabled = true");
    assert_that(&source).contains("aria-busy");
}
