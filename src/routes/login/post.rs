use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;

use crate::domain::{FormError, LoginCredentials};
use crate::identity_gateway::{Account, GatewayError, IdentityGateway};
use crate::session_state::TypedSession;
use crate::utils::{error_chain_fmt, see_other};

#[derive(serde::Deserialize)]
pub struct FormData {
    email: Option<String>,
    password: Option<String>,
}

#[derive(thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    ValidationError(#[from] FormError),
    #[error("Invalid email or user does not exist.")]
    UnknownAccount(#[source] GatewayError),
    #[error("Please verify your email before logging in.")]
    Unverified,
    #[error("Invalid email or password.")]
    InvalidPassword(#[source] GatewayError),
    #[error("An error occurred. Please try again.")]
    UnexpectedError(#[source] anyhow::Error),
}

impl std::fmt::Debug for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[tracing::instrument(
    skip_all,
    fields(email = ?form.email, account_id = tracing::field::Empty)
)]
pub async fn login(
    form: web::Form<FormData>,
    gateway: web::Data<IdentityGateway>,
    session: TypedSession,
) -> HttpResponse {
    let FormData { email, password } = form.into_inner();

    match log_in(email, password, &gateway, &session).await {
        Ok(()) => see_other("/"),
        Err(e) => {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "Login attempt rejected"
            );
            FlashMessage::error(e.to_string()).send();
            see_other("/login")
        }
    }
}

async fn log_in(
    email: Option<String>,
    password: Option<String>,
    gateway: &IdentityGateway,
    session: &TypedSession,
) -> Result<(), LoginError> {
    let account = authenticate(email, password, gateway).await?;
    tracing::Span::current().record("account_id", &tracing::field::display(&account.id));

    let display_name = account.display_name.unwrap_or(account.email);
    session.renew();
    session
        .insert_display_name(&display_name)
        .map_err(|e| LoginError::UnexpectedError(e.into()))?;
    Ok(())
}

/// Looks the account up, requires a verified email, then checks the
/// password. Only an account passing all three may get a session.
#[tracing::instrument(name = "Authenticate an account", skip_all)]
async fn authenticate(
    email: Option<String>,
    password: Option<String>,
    gateway: &IdentityGateway,
) -> Result<Account, LoginError> {
    let credentials = LoginCredentials::parse(email, password)?;

    let account = gateway
        .get_account_by_email(credentials.email.as_ref())
        .await
        .map_err(LoginError::UnknownAccount)?;

    if !account.email_verified {
        return Err(LoginError::Unverified);
    }

    gateway
        .verify_password(&account.email, &credentials.password)
        .await
        .map_err(|e| match e {
            e @ GatewayError::InvalidCredentials => LoginError::InvalidPassword(e),
            e => LoginError::UnexpectedError(e.into()),
        })?;

    Ok(account)
}
