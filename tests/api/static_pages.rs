use crate::helpers::spawn_app;

#[tokio::test]
async fn informational_pages_are_served() {
    // Arrange
    let app = spawn_app().await;

    for (route, title) in [
        ("/about_us", "About us"),
        ("/turtle_gallery", "Turtle gallery"),
    ] {
        // Act
        let response = app
            .api_client
            .get(&format!("{}{}", &app.address, route))
            .send()
            .await
            .expect("Failed to execute request.");

        // Assert
        assert_eq!(response.status().as_u16(), 200, "{} did not render", route);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        let html_page = response.text().await.unwrap();
        assert!(html_page.contains(&format!("<title>{}</title>", title)));
    }
}

#[tokio::test]
async fn the_gallery_lists_turtles() {
    let app = spawn_app().await;

    let html_page = app
        .api_client
        .get(&format!("{}/turtle_gallery", &app.address))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html_page.contains("Leatherback turtle"));
}
