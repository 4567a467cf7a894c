use actix_web::{web, HttpResponse};

use crate::identity_gateway::IdentityGateway;
use crate::routes::layout::page;

#[tracing::instrument(name = "Checking email verification status", skip(gateway))]
pub async fn verify_email(
    account_id: web::Path<String>,
    gateway: web::Data<IdentityGateway>,
) -> HttpResponse {
    let message = match gateway.get_account(&account_id).await {
        Ok(account) if account.email_verified => {
            "Your email has already been verified."
        }
        Ok(_) => {
            "Please click the link in your email to verify your email address."
        }
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to look up the account"
            );
            "Error during email verification."
        }
    };
    page("Verify your email", &format!("<p>{}</p>", message))
}
