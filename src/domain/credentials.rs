use secrecy::Secret;

use crate::domain::{FormError, RequiredField};

#[derive(Debug)]
pub struct LoginCredentials {
    pub email: RequiredField,
    pub password: Secret<String>,
}

impl LoginCredentials {
    pub fn parse(
        email: Option<String>,
        password: Option<String>,
    ) -> Result<LoginCredentials, FormError> {
        let email = RequiredField::parse(email)?;
        let password = RequiredField::parse(password)?;
        Ok(Self {
            email,
            password: Secret::new(password.into_inner()),
        })
    }
}
