use crate::helpers::spawn_app;

#[tokio::test]
async fn anonymous_visitors_get_a_generic_greeting() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let html_page = app.get_home_html().await;

    // Assert
    assert!(html_page.contains("Welcome to the turtle sanctuary!"));
    assert!(!html_page.contains("<p>Welcome, "));
}

#[tokio::test]
async fn an_unknown_session_cookie_is_ignored() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = reqwest::Client::new()
        .get(&format!("{}/", &app.address))
        .header("Cookie", "session_id=forged-token")
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let html_page = response.text().await.unwrap();
    assert!(html_page.contains("Welcome to the turtle sanctuary!"));
}
