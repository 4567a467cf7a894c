use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{assert_is_redirect_to, spawn_app, spawn_app_with, CONTACT_RECIPIENT};

#[tokio::test]
async fn contact_form_is_rendered() {
    let app = spawn_app().await;

    let html_page = app.get_contact_html().await;

    assert!(html_page.contains(r#"<form action="/contact" method="post">"#));
    assert!(html_page.contains(r#"<textarea name="message""#));
}

#[tokio::test]
async fn missing_fields_send_nothing() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for body in [
        json!({ "email": "ursula_le_guin@gmail.com", "message": "Hi" }),
        json!({ "name": "Ursula", "message": "Hi" }),
        json!({ "name": "Ursula", "email": "ursula_le_guin@gmail.com", "message": "" }),
    ] {
        // Act
        let response = app.post_contact(&body).await;

        // Assert
        assert_is_redirect_to(&response, "/contact");
        let html_page = app.get_contact_html().await;
        assert!(html_page.contains("<i>All fields are required!</i>"));
    }
}

#[tokio::test]
async fn a_complete_message_is_sent_once_to_the_fixed_recipient() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_contact(&json!({
            "name": "Ursula",
            "email": "ursula_le_guin@gmail.com",
            "message": "How can I volunteer?",
        }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/contact");
    let email = app.sent_emails().await.pop().unwrap();
    assert_eq!(email["To"], CONTACT_RECIPIENT);
    assert_eq!(email["Subject"], "New Message from Ursula");
    let text = email["TextBody"].as_str().unwrap();
    assert!(text.contains("Ursula (ursula_le_guin@gmail.com)"));
    assert!(text.contains("How can I volunteer?"));

    let html_page = app.get_contact_html().await;
    assert!(html_page.contains(
        r#"<p class="success"><i>Your message has been sent successfully! Thank you for contacting us.</i></p>"#
    ));
}

#[tokio::test]
async fn field_content_is_not_validated() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    app.post_contact(&json!({
        "name": "<script>",
        "email": "not an email",
        "message": "x",
    }))
    .await;

    // Assert
    let email = app.sent_emails().await.pop().unwrap();
    assert_eq!(email["To"], CONTACT_RECIPIENT);
    assert!(!email["HtmlBody"].as_str().unwrap().contains("<script>"));
}

#[tokio::test]
async fn a_relay_failure_is_reported() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    app.post_contact(&json!({
        "name": "Ursula",
        "email": "ursula_le_guin@gmail.com",
        "message": "Hello",
    }))
    .await;

    // Assert
    let html_page = app.get_contact_html().await;
    assert!(html_page.contains(
        "<i>There was an error sending your message. Please try again later.</i>"
    ));
}

#[tokio::test]
async fn a_long_message_is_sent_once_to_the_fixed_recipient() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;
    let message = "a".repeat(20_000);

    // Act
    let response = app
        .post_contact(&json!({
            "name": "Ursula",
            "email": "ursula_le_guin@gmail.com",
            "message": message,
        }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/contact");
    let email = app.sent_emails().await.pop().unwrap();
    assert_eq!(email["To"], CONTACT_RECIPIENT);
    assert!(email["TextBody"].as_str().unwrap().contains(&message));
    let html_page = app.get_contact_html().await;
    assert!(html_page.contains("<i>Your message has been sent successfully!"));
}

#[tokio::test]
async fn a_submission_over_the_form_limit_is_reported_on_the_form() {
    // Arrange
    let app = spawn_app_with(|c| c.application.max_form_bytes = 1024).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_contact(&json!({
            "name": "Ursula",
            "email": "ursula_le_guin@gmail.com",
            "message": "a".repeat(4096),
        }))
        .await;

    // Assert
    assert_is_redirect_to(&response, "/contact");
    let html_page = app.get_contact_html().await;
    assert!(html_page.contains(
        "<i>Your submission is too large. Please shorten it and try again.</i>"
    ));
}
