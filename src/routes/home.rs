use actix_web::HttpResponse;

use crate::routes::layout::page;
use crate::session_state::TypedSession;
use crate::utils::e500;

pub async fn home(session: TypedSession) -> Result<HttpResponse, actix_web::Error> {
    let greeting = match session.get_display_name().map_err(e500)? {
        Some(name) => format!(
            "<p>Welcome, {}!</p>",
            htmlescape::encode_minimal(&name)
        ),
        None => r#"<p>Welcome to the turtle sanctuary!</p>
    <p><a href="/login">Log in</a> or <a href="/signup">create an account</a>.</p>"#
            .to_string(),
    };
    Ok(page("Home", &greeting))
}
