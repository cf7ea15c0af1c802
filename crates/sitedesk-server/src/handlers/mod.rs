//! HTTP handlers for the public and admin API.

mod contact;
mod error;
mod health;

pub use contact::{
    CreateContactRequest, create_contact_request, get_contact_request, list_contact_requests,
};
pub use error::ApiError;
pub use health::health;
