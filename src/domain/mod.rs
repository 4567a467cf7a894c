mod contact_message;
mod credentials;
mod email_address;
mod form_field;
mod new_account;

pub use contact_message::ContactMessage;
pub use credentials::LoginCredentials;
pub use email_address::EmailAddress;
pub use form_field::{FormError, RequiredField};
pub use new_account::{NewAccount, MIN_PASSWORD_LENGTH};
