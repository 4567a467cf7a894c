use wiremock::matchers::{any, body_json, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{account_record, spawn_app};

#[tokio::test]
async fn a_verified_account_is_reported_as_verified() {
    // Arrange
    let app = spawn_app().await;
    app.mount_account_lookup(account_record("uid-1", "ursula_le_guin@gmail.com", None, true))
        .await;

    // Act
    let html_page = app.get_verify_email_html("uid-1").await;

    // Assert
    assert!(html_page.contains("<p>Your email has already been verified.</p>"));
}

#[tokio::test]
async fn an_unverified_account_is_asked_to_click_the_link() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/accounts:lookup"))
        .and(body_json(serde_json::json!({ "localId": ["uid-1"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [account_record("uid-1", "ursula_le_guin@gmail.com", None, false)]
        })))
        .expect(1)
        .mount(&app.gateway_server)
        .await;

    // Act
    let html_page = app.get_verify_email_html("uid-1").await;

    // Assert
    assert!(html_page.contains(
        "<p>Please click the link in your email to verify your email address.</p>"
    ));
}

#[tokio::test]
async fn lookup_failures_render_an_error_page() {
    let app = spawn_app().await;

    for response in [
        ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
        ResponseTemplate::new(500),
    ] {
        // Arrange
        let _guard = Mock::given(any())
            .respond_with(response)
            .mount_as_scoped(&app.gateway_server)
            .await;

        // Act
        let response = app
            .api_client
            .get(&format!("{}/verify_email/uid-404", &app.address))
            .send()
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status().as_u16(), 200);
        let html_page = response.text().await.unwrap();
        assert!(html_page.contains("<p>Error during email verification.</p>"));
    }
}

#[tokio::test]
async fn checking_the_status_twice_gives_the_same_answer() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/accounts:lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "users": [account_record("uid-1", "ursula_le_guin@gmail.com", None, false)]
        })))
        .expect(2)
        .mount(&app.gateway_server)
        .await;

    // Act
    let first = app.get_verify_email_html("uid-1").await;
    let second = app.get_verify_email_html("uid-1").await;

    // Assert
    assert_eq!(first, second);
}
