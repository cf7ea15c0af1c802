//! Authentication HTTP handlers.

mod login;
mod logout;
mod profile;

pub use login::{LoginRequest, LoginResponse, LoginState, PublicUser, login};
pub use logout::{LogoutState, logout};
pub use profile::{ProfileResponse, profile};
