use std::net::TcpListener;

use actix_session::config::PersistentSession;
use actix_session::storage::SessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{time, Key};
use actix_web::dev::Server;
use actix_web::error::{InternalError, UrlencodedError};
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::{FlashMessage, FlashMessagesFramework};
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::{EmailAddress, FormError};
use crate::email_client::EmailClient;
use crate::identity_gateway::IdentityGateway;
use crate::routes::contact::{contact, contact_form};
use crate::routes::login::{login, login_form};
use crate::routes::signup::{signup, signup_form};
use crate::routes::{about_us, health_check, home, turtle_gallery, verify_email};
use crate::session_state::{InMemorySessionStore, SESSION_COOKIE};
use crate::utils::see_other;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    /// Any failure here aborts startup: bad configuration, an identity
    /// gateway client that cannot be initialised, or a port already taken.
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let sender_email = configuration
            .email_client
            .sender()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid sender email address")?;
        let contact_recipient = configuration
            .email_client
            .contact_recipient()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid contact recipient email address")?;

        let email_client = EmailClient::new(
            configuration.email_client.base_url.clone(),
            sender_email,
            configuration.email_client.authorization_token.clone(),
            configuration.email_client.timeout(),
        )
        .context("Failed to build the email client")?;

        let identity_gateway = IdentityGateway::new(
            configuration.identity_gateway.base_url.clone(),
            configuration.identity_gateway.api_key.clone(),
            configuration.identity_gateway.timeout(),
        )
        .context("Failed to initialise the identity gateway client")?;

        let session_ttl = configuration.application.session_ttl();
        let max_form_bytes = configuration.application.max_form_bytes;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        tracing::info!("app started at: {}:{}", configuration.application.host, port);
        let server = run(
            listener,
            identity_gateway,
            email_client,
            InMemorySessionStore::new(),
            AppSettings {
                base_url: configuration.application.base_url,
                hmac_secret: configuration.application.hmac_secret,
                contact_recipient,
                session_ttl,
                max_form_bytes,
            },
        )?;
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // A more expressive name that makes it clear that
    // this function only returns when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

// We need to define a wrapper type in order to retrieve the URL
// in the signup handler
// Retrieval from the context, in actix-web, is type based:
// using a raw String would expose us to conflicts
pub struct ApplicationBaseUrl(pub String);

/// Fixed mailbox receiving contact form submissions.
pub struct ContactRecipient(pub EmailAddress);

pub struct AppSettings {
    pub base_url: String,
    pub hmac_secret: Secret<String>,
    pub contact_recipient: EmailAddress,
    pub session_ttl: time::Duration,
    pub max_form_bytes: usize,
}

/// Form bodies that cannot be extracted still go through post/redirect/get:
/// the failure becomes a flash error on the form the request came from.
fn form_config(limit: usize) -> web::FormConfig {
    web::FormConfig::default()
        .limit(limit)
        .error_handler(|err, req| {
            tracing::warn!(
                error.message = %err,
                path = %req.path(),
                "Rejected a form submission"
            );
            let message = match err {
                UrlencodedError::Overflow { .. } => {
                    "Your submission is too large. Please shorten it and try again."
                        .to_string()
                }
                _ => FormError::MissingFields.to_string(),
            };
            FlashMessage::error(message).send();
            InternalError::from_response(err, see_other(req.path())).into()
        })
}

/// The session backend is injected: any `SessionStore` shared between
/// clones works, the binary uses `InMemorySessionStore`.
pub fn run<S>(
    listener: TcpListener,
    identity_gateway: IdentityGateway,
    email_client: EmailClient,
    session_store: S,
    settings: AppSettings,
) -> Result<Server, anyhow::Error>
where
    S: SessionStore + Clone + Send + 'static,
{
    let identity_gateway = Data::new(identity_gateway);
    let email_client = Data::new(email_client);
    let base_url = Data::new(ApplicationBaseUrl(settings.base_url));
    let contact_recipient = Data::new(ContactRecipient(settings.contact_recipient));
    let session_ttl = settings.session_ttl;
    let max_form_bytes = settings.max_form_bytes;

    let hmac_secret = settings.hmac_secret.expose_secret().as_bytes();
    // `Key::from` panics on shorter keys
    if hmac_secret.len() < 64 {
        anyhow::bail!("The hmac secret must be at least 64 bytes long");
    }
    let secret_key = Key::from(hmac_secret);
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let server = HttpServer::new(move || {
        App::new()
            // Middlewares are added using the `wrap` method on `App`
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(session_store.clone(), secret_key.clone())
                    .cookie_name(SESSION_COOKIE.to_string())
                    .session_lifecycle(PersistentSession::default().session_ttl(session_ttl))
                    .build(),
            )
            .wrap(TracingLogger::default())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .route("/signup", web::get().to(signup_form))
            .route("/signup", web::post().to(signup))
            .route("/verify_email/{account_id}", web::get().to(verify_email))
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .route("/contact", web::get().to(contact_form))
            .route("/contact", web::post().to(contact))
            .route("/about_us", web::get().to(about_us))
            .route("/turtle_gallery", web::get().to(turtle_gallery))
            .app_data(identity_gateway.clone())
            .app_data(email_client.clone())
            .app_data(form_config(max_form_bytes))
            .app_data(base_url.clone())
            .app_data(contact_recipient.clone())
    })
    .listen(listener)?
    .run();
    // No .await here
    Ok(server)
}
