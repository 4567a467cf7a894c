/// Local validation failures. The `Display` output is shown to the user as is.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("All fields are required!")]
    MissingFields,
    #[error("Password must be at least {0} characters!")]
    PasswordTooShort(usize),
}

/// A form value that was submitted and is not blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredField(String);

impl RequiredField {
    /// Fields absent from the payload and whitespace-only fields are both
    /// rejected. The value is kept untrimmed.
    pub fn parse(s: Option<String>) -> Result<RequiredField, FormError> {
        match s {
            Some(s) if !s.trim().is_empty() => Ok(Self(s)),
            _ => Err(FormError::MissingFields),
        }
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RequiredField {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
