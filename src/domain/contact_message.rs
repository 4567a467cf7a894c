use crate::domain::{FormError, RequiredField};

/// A contact form submission. Only presence is checked, the content is
/// forwarded verbatim.
#[derive(Debug)]
pub struct ContactMessage {
    pub name: RequiredField,
    pub email: RequiredField,
    pub message: RequiredField,
}

impl ContactMessage {
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<ContactMessage, FormError> {
        Ok(Self {
            name: RequiredField::parse(name)?,
            email: RequiredField::parse(email)?,
            message: RequiredField::parse(message)?,
        })
    }

    pub fn subject(&self) -> String {
        format!("New Message from {}", self.name)
    }

    pub fn text_body(&self) -> String {
        format!(
            "Hello,\n\nYou have received a new message from {} ({}):\n\n{}",
            self.name, self.email, self.message
        )
    }

    pub fn html_body(&self) -> String {
        format!(
            "<p>Hello,</p>\
            <p>You have received a new message from {} ({}):</p>\
            <p>{}</p>",
            htmlescape::encode_minimal(self.name.as_ref()),
            htmlescape::encode_minimal(self.email.as_ref()),
            htmlescape::encode_minimal(self.message.as_ref()),
        )
    }
}
