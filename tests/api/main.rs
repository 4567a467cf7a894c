mod contact;
mod health_check;
mod home;
mod static_pages;
mod verify_email;
