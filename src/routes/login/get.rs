use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use crate::routes::layout::{flash_html, page};

pub async fn login_form(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let error_html = flash_html(&flash_messages);
    page(
        "Login",
        &format!(
            r#"{error_html}
    <form action="/login" method="post">
        <label>Email
            <input
                type="email"
                placeholder="Enter your email"
                name="email"
            >
        </label>
        <label>Password
            <input
                type="password"
                placeholder="Enter Password"
                name="password"
            >
        </label>
        <button type="submit">Login</button>
    </form>"#
        ),
    )
}
