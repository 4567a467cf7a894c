mod about;
pub mod contact;
mod health_check;
mod home;
mod layout;
pub mod login;
pub mod signup;
mod verify_email;

pub use about::*;
pub use health_check::*;
pub use home::*;
pub use verify_email::*;
