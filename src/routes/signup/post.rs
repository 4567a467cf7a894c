use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;

use crate::domain::{EmailAddress, FormError, NewAccount};
use crate::email_client::EmailClient;
use crate::identity_gateway::{Account, GatewayError, IdentityGateway};
use crate::startup::ApplicationBaseUrl;
use crate::utils::{error_chain_fmt, see_other};

#[derive(serde::Deserialize)]
pub struct FormData {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(thiserror::Error)]
pub enum SignupError {
    #[error(transparent)]
    ValidationError(#[from] FormError),
    #[error("An error occurred. Please try again.")]
    AccountError(#[from] GatewayError),
    // The account exists at this point, nothing is rolled back
    #[error("There was an error sending the verification email. Please try again later.")]
    DeliveryError(#[source] anyhow::Error),
}

impl std::fmt::Debug for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[tracing::instrument(
    name = "Signing up a new account",
    skip_all,
    fields(email = ?form.email, name = ?form.name)
)]
pub async fn signup(
    form: web::Form<FormData>,
    gateway: web::Data<IdentityGateway>,
    email_client: web::Data<EmailClient>,
    base_url: web::Data<ApplicationBaseUrl>,
) -> HttpResponse {
    let FormData {
        name,
        email,
        password,
    } = form.into_inner();

    match create_account(name, email, password, &gateway, &email_client, &base_url.0).await {
        Ok(account) => {
            FlashMessage::info(format!(
                "User {} created successfully! \
                Please check your email to verify your account.",
                account.display_name.unwrap_or(account.email)
            ))
            .send();
        }
        Err(e) => {
            if !matches!(e, SignupError::ValidationError(_)) {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Failed to sign up a new account"
                );
            }
            FlashMessage::error(e.to_string()).send();
        }
    }
    see_other("/signup")
}

async fn create_account(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    gateway: &IdentityGateway,
    email_client: &EmailClient,
    base_url: &str,
) -> Result<Account, SignupError> {
    // Local checks run before any network call
    let new_account = NewAccount::parse(name, email, password)?;

    let mut account = gateway
        .create_account(
            new_account.email.as_ref(),
            &new_account.password,
            new_account.name.as_ref(),
        )
        .await?;
    if account.display_name.is_none() {
        account.display_name = Some(new_account.name.into_inner());
    }
    let verification_link = gateway
        .generate_email_verification_link(&account.email)
        .await?;

    send_verification_email(email_client, &account, &verification_link, base_url)
        .await
        .map_err(SignupError::DeliveryError)?;
    Ok(account)
}

#[tracing::instrument(
    name = "Send a verification email to a new account",
    skip(email_client, account, verification_link, base_url),
    fields(account_id = %account.id)
)]
pub async fn send_verification_email(
    email_client: &EmailClient,
    account: &Account,
    verification_link: &str,
    base_url: &str,
) -> Result<(), anyhow::Error> {
    let recipient = EmailAddress::parse(account.email.clone())
        .map_err(|e| anyhow::anyhow!(e))?;
    let name = account.display_name.as_deref().unwrap_or(&account.email);
    let status_link = format!("{}/verify_email/{}", base_url, account.id);

    let plain_body = format!(
        "Hello {},\n\nPlease verify your email by clicking the following link:\n{}\n\n\
        You can check the status of your account at {}",
        name, verification_link, status_link
    );
    let html_body = format!(
        "<p>Hello {},</p>\
        <p>Please verify your email by clicking <a href=\"{}\">here</a>.</p>\
        <p>You can check the status of your account <a href=\"{}\">here</a>.</p>",
        htmlescape::encode_minimal(name),
        htmlescape::encode_minimal(verification_link),
        htmlescape::encode_minimal(&status_link),
    );
    email_client
        .send_email(&recipient, "Verify your email address", &html_body, &plain_body)
        .await
        .context("Failed to send the verification email")
}
