use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use crate::domain::{ContactMessage, FormError};
use crate::email_client::EmailClient;
use crate::startup::ContactRecipient;
use crate::utils::{error_chain_fmt, see_other};

#[derive(serde::Deserialize)]
pub struct FormData {
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] FormError),
    #[error("There was an error sending your message. Please try again later.")]
    DeliveryError(#[from] reqwest::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[tracing::instrument(
    name = "Forwarding a contact message",
    skip_all,
    fields(sender_email = ?form.email, sender_name = ?form.name)
)]
pub async fn contact(
    form: web::Form<FormData>,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<ContactRecipient>,
) -> HttpResponse {
    let FormData {
        name,
        email,
        message,
    } = form.into_inner();

    match forward_message(name, email, message, &email_client, &recipient).await {
        Ok(()) => FlashMessage::info(
            "Your message has been sent successfully! Thank you for contacting us.",
        )
        .send(),
        Err(e) => {
            if let ContactError::DeliveryError(_) = e {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to forward a contact message"
                );
            }
            FlashMessage::error(e.to_string()).send();
        }
    }
    see_other("/contact")
}

async fn forward_message(
    name: Option<String>,
    email: Option<String>,
    message: Option<String>,
    email_client: &EmailClient,
    recipient: &ContactRecipient,
) -> Result<(), ContactError> {
    let message = ContactMessage::parse(name, email, message)?;
    email_client
        .send_email(
            &recipient.0,
            &message.subject(),
            &message.html_body(),
            &message.text_body(),
        )
        .await?;
    Ok(())
}
