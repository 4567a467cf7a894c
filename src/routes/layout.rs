use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use actix_web_flash_messages::{IncomingFlashMessages, Level};

/// Wraps `body` in the shared page chrome and navigation bar.
pub fn page(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>{title}</title>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about_us">About us</a>
        <a href="/turtle_gallery">Turtle gallery</a>
        <a href="/contact">Contact</a>
        <a href="/login">Login</a>
        <a href="/signup">Sign up</a>
    </nav>
    <h1>{title}</h1>
    {body}
</body>
</html>"#
        ))
}

/// Error messages and confirmations are styled apart.
pub fn flash_html(flash_messages: &IncomingFlashMessages) -> String {
    flash_messages
        .iter()
        .map(|m| {
            let class = match m.level() {
                Level::Error | Level::Warning => "error",
                _ => "success",
            };
            format!(
                r#"<p class="{}"><i>{}</i></p>"#,
                class,
                htmlescape::encode_minimal(m.content())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
