use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use crate::routes::layout::{flash_html, page};

pub async fn contact_form(flash_messages: IncomingFlashMessages) -> HttpResponse {
    let msg_html = flash_html(&flash_messages);
    page(
        "Contact",
        &format!(
            r#"{msg_html}
    <form action="/contact" method="post">
        <label>Name
            <input type="text" placeholder="Your name" name="name">
        </label>
        <label>Email
            <input type="email" placeholder="Where we can reach you" name="email">
        </label>
        <label>Message
            <textarea name="message" placeholder="Your message"></textarea>
        </label>
        <button type="submit">Send</button>
    </form>"#
        ),
    )
}
