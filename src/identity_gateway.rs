//! src/identity_gateway.rs
//!
//! Client for the hosted identity provider. Account records, passwords and
//! verification tokens all live on the provider side; this module only
//! forwards requests and translates the responses into [`Account`] values
//! or a [`GatewayError`].
use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::error_chain_fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub email_verified: bool,
}

#[derive(thiserror::Error)]
pub enum GatewayError {
    #[error("No matching account was found.")]
    NotFound,
    #[error("The email or password is incorrect.")]
    InvalidCredentials,
    #[error("The identity gateway rejected the request: {0}")]
    Rejected(String),
    #[error("Failed to reach the identity gateway.")]
    Unexpected(#[from] reqwest::Error),
}

impl std::fmt::Debug for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[derive(Clone, Debug)]
pub struct IdentityGateway {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl IdentityGateway {
    /// Fails when the base url does not parse or the http client cannot be
    /// built. Both are fatal at startup.
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: std::time::Duration,
    ) -> Result<Self, anyhow::Error> {
        reqwest::Url::parse(&base_url).with_context(|| {
            format!("Invalid identity gateway base url: {}", base_url)
        })?;
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the identity gateway http client")?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    #[tracing::instrument(
        name = "Creating an account",
        skip(self, password),
        fields(email = %email)
    )]
    pub async fn create_account(
        &self,
        email: &str,
        password: &Secret<String>,
        display_name: &str,
    ) -> Result<Account, GatewayError> {
        let response: SignUpResponse = self
            .call(
                "accounts:signUp",
                &SignUpRequest {
                    email,
                    password: password.expose_secret(),
                    display_name,
                },
            )
            .await?;
        Ok(Account {
            id: response.local_id,
            email: response.email,
            display_name: response.display_name,
            email_verified: false,
        })
    }

    #[tracing::instrument(name = "Fetching an account by id", skip(self))]
    pub async fn get_account(&self, id: &str) -> Result<Account, GatewayError> {
        self.lookup(&LookupRequest::ById { local_id: [id] }).await
    }

    #[tracing::instrument(name = "Fetching an account by email", skip(self))]
    pub async fn get_account_by_email(
        &self,
        email: &str,
    ) -> Result<Account, GatewayError> {
        self.lookup(&LookupRequest::ByEmail { email: [email] }).await
    }

    #[tracing::instrument(name = "Generating an email verification link", skip(self))]
    pub async fn generate_email_verification_link(
        &self,
        email: &str,
    ) -> Result<String, GatewayError> {
        let response: OobCodeResponse = self
            .call(
                "accounts:sendOobCode",
                &OobCodeRequest {
                    request_type: "VERIFY_EMAIL",
                    email,
                    return_oob_link: true,
                },
            )
            .await?;
        Ok(response.oob_link)
    }

    /// Checks a password against the account registered under `email`.
    #[tracing::instrument(
        name = "Verifying a password",
        skip(self, password),
        fields(email = %email)
    )]
    pub async fn verify_password(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<(), GatewayError> {
        let outcome: Result<serde_json::Value, _> = self
            .call(
                "accounts:signInWithPassword",
                &SignInRequest {
                    email,
                    password: password.expose_secret(),
                    return_secure_token: false,
                },
            )
            .await;
        match outcome {
            Ok(_) => Ok(()),
            Err(GatewayError::Rejected(message))
                if CREDENTIAL_ERRORS.iter().any(|c| message.starts_with(c)) =>
            {
                Err(GatewayError::InvalidCredentials)
            }
            Err(e) => Err(e),
        }
    }

    async fn lookup(
        &self,
        request: &LookupRequest<'_>,
    ) -> Result<Account, GatewayError> {
        let response: LookupResponse =
            self.call("accounts:lookup", request).await?;
        response
            .users
            .into_iter()
            .next()
            .map(Account::from)
            .ok_or(GatewayError::NotFound)
    }

    async fn call<B, R>(&self, operation: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, operation);
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let message = match response.json::<ErrorResponse>().await {
            Ok(e) => e.error.message,
            Err(_) => status.to_string(),
        };
        tracing::warn!(%status, %message, operation, "Identity gateway rejected the request");
        Err(GatewayError::Rejected(message))
    }
}

const CREDENTIAL_ERRORS: [&str; 3] = [
    "INVALID_PASSWORD",
    "INVALID_LOGIN_CREDENTIALS",
    "EMAIL_NOT_FOUND",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    display_name: &'a str,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
    email: String,
    display_name: Option<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum LookupRequest<'a> {
    ById {
        #[serde(rename = "localId")]
        local_id: [&'a str; 1],
    },
    ByEmail { email: [&'a str; 1] },
}

#[derive(serde::Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<AccountRecord>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountRecord {
    local_id: String,
    #[serde(default)]
    email: String,
    display_name: Option<String>,
    #[serde(default)]
    email_verified: bool,
}

impl From<AccountRecord> for Account {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.local_id,
            email: record.email,
            display_name: record.display_name,
            email_verified: record.email_verified,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'a str,
    email: &'a str,
    return_oob_link: bool,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeResponse {
    oob_link: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}
