use actix_web::HttpResponse;

use crate::routes::layout::page;

const GALLERY: [(&str, &str); 4] = [
    ("Green sea turtle", "Grazing on seagrass in shallow lagoons."),
    ("Hawksbill turtle", "Named after its narrow, pointed beak."),
    ("Loggerhead turtle", "Strong jaws for crushing crabs and clams."),
    ("Leatherback turtle", "The largest living turtle, diving past 1000 metres."),
];

pub async fn about_us() -> HttpResponse {
    page(
        "About us",
        r#"<p>We are a small volunteer group caring for sea turtles along the coast.</p>
    <p>We patrol nesting beaches, rescue injured turtles and teach visitors how to help.</p>
    <p>Want to join us? <a href="/contact">Get in touch</a>.</p>"#,
    )
}

pub async fn turtle_gallery() -> HttpResponse {
    let figures = GALLERY
        .iter()
        .map(|(species, caption)| {
            format!(
                "<figure>\n        <h2>{}</h2>\n        <figcaption>{}</figcaption>\n    </figure>",
                species, caption
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ");
    page("Turtle gallery", &figures)
}
