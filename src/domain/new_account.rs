use secrecy::Secret;

use crate::domain::{FormError, RequiredField};

/// Shortest password accepted before the identity gateway is contacted.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A sign-up submission that passed every local check.
#[derive(Debug)]
pub struct NewAccount {
    pub name: RequiredField,
    pub email: RequiredField,
    pub password: Secret<String>,
}

impl NewAccount {
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<NewAccount, FormError> {
        // Presence is checked on all three fields before the password length
        let name = RequiredField::parse(name);
        let email = RequiredField::parse(email);
        let password = RequiredField::parse(password);
        let (name, email, password) = (name?, email?, password?);
        // Length is counted in characters, not bytes
        if password.as_ref().chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FormError::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }
        Ok(Self {
            name,
            email,
            password: Secret::new(password.into_inner()),
        })
    }
}
