use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use crate::routes::layout::{flash_html, page};

pub async fn signup_form(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let msg_html = flash_html(&flash_messages);
    page(
        "Sign up",
        &format!(
            r#"{msg_html}
    <form action="/signup" method="post">
        <label>Name
            <input type="text" placeholder="Enter your name" name="name">
        </label>
        <label>Email
            <input type="email" placeholder="Enter your email" name="email">
        </label>
        <label>Password
            <input type="password" placeholder="At least 6 characters" name="password">
        </label>
        <button type="submit">Sign up</button>
    </form>
    <p>Already registered? <a href="/login">Log in</a>.</p>"#
        ),
    )
}
