//! Authentication module.
//!
//! Owns credential validation, password hashing, token issuance and the
//! sign-up/login orchestration around the user store.

pub mod handlers;
mod password;
mod service;
mod token;

pub use password::PasswordHasher;
pub use service::{AuthService, LoginResponse, SignUpResponse};
pub use token::{Claims, TokenIssuer};
