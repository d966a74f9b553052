use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, AuthError};
use crate::store::models::{NewUser, PublicUser};
use crate::store::UserStore;
use super::password::PasswordHasher;
use super::token::{Claims, TokenIssuer};

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: PublicUser,
}

/// Owns the sign-up/login business rules. Collaborators are injected so the
/// store, hasher and signer can each be swapped out in tests.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher, tokens: TokenIssuer) -> Self {
        Self { store, hasher, tokens }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<SignUpResponse, AppError> {
        info!("Attempting to register user: {}", email);

        if email.is_empty() || password.is_empty() || first_name.is_empty() || last_name.is_empty()
        {
            warn!("Missing required fields for sign up");
            return Err(AppError::Validation("All fields are required".into()));
        }

        // Existence check must complete before the insert; a concurrent
        // sign-up that slips between the two surfaces as a conflict from the
        // store's unique constraint.
        if self.store.find_by_email(email).await?.is_some() {
            warn!("User with email {} already exists", email);
            return Err(AppError::Conflict(
                "User with this email already exists".into(),
            ));
        }

        let password_hash = self.hasher.hash(password)?;

        let user = self
            .store
            .create(NewUser {
                email: email.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                password_hash,
            })
            .await?;

        info!("User registered successfully: {}", email);

        Ok(SignUpResponse {
            message: "User registered successfully".to_string(),
            user: PublicUser::from(&user),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        info!("Attempting login for user: {}", email);

        if email.is_empty() || password.is_empty() {
            warn!("Missing email or password for login");
            return Err(AppError::Validation(
                "Email and password are required".into(),
            ));
        }

        // Unknown email and wrong password take the same exit so the response
        // never reveals which one it was.
        let Some(user) = self.store.find_by_email(email).await? else {
            warn!("Login failed for {}", email);
            return Err(AppError::Auth(AuthError::InvalidCredentials));
        };

        if !self.hasher.verify(password, &user.password_hash)? {
            warn!("Login failed for {}", email);
            return Err(AppError::Auth(AuthError::InvalidCredentials));
        }

        let access_token = self.tokens.issue(&user)?;

        info!("User logged in successfully: {}", email);

        Ok(LoginResponse {
            access_token,
            user: PublicUser::from(&user),
        })
    }

    /// Resolves an opaque user id (typically a token subject) to its public
    /// projection. Absence is a "no user" result, not an error; callers treat
    /// it as unauthenticated.
    pub async fn validate_user(&self, user_id: &str) -> Result<Option<PublicUser>, AppError> {
        debug!("Validating user by id: {}", user_id);

        let Ok(id) = Uuid::parse_str(user_id) else {
            return Ok(None);
        };

        let user = self.store.find_by_id(id).await?;
        Ok(user.as_ref().map(PublicUser::from))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        self.tokens.validate(token)
    }

    /// Full bearer-token resolution: validate the token, then look up its
    /// subject.
    pub async fn current_user(&self, token: &str) -> Result<Option<PublicUser>, AppError> {
        let claims = self.tokens.validate(token)?;
        self.validate_user(&claims.sub).await
    }
}
