use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{AppError, AuthError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "firstName")]
    pub first_name: String,
    #[serde(default, rename = "lastName")]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Password policy enforced once at the boundary; the core assumes
/// pre-validated input. At least 8 characters with upper and lower case, a
/// digit and a symbol.
fn check_password_strength(password: &str) -> Result<(), AppError> {
    let long_enough = password.chars().count() >= 8;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_alphanumeric());

    if long_enough && has_upper && has_lower && has_digit && has_symbol {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Password must be at least 8 characters and contain an uppercase letter, \
             a lowercase letter, a number, and a special character"
                .into(),
        ))
    }
}

fn check_email_shape(email: &str) -> Result<(), AppError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AppError::Validation("Email must be a valid address".into()));
    }
    Ok(())
}

pub async fn signup(
    req: web::Json<SignUpRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received sign-up request for email: {}", req.email);

    // Shape checks only apply to fields that are present; missing fields fall
    // through to the service's required-fields rule.
    if !req.email.is_empty() {
        check_email_shape(&req.email)?;
    }
    if !req.password.is_empty() {
        check_password_strength(&req.password)?;
    }

    match state
        .auth_service
        .sign_up(&req.email, &req.password, &req.first_name, &req.last_name)
        .await
    {
        Ok(response) => {
            info!("Sign-up successful for email: {}", req.email);
            Ok(HttpResponse::Created().json(response))
        }
        Err(e) => {
            error!("Sign-up failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);

    match state.auth_service.login(&req.email, &req.password).await {
        Ok(response) => {
            info!("Login successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e) => {
            error!("Login failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

/// Resolves the bearer token to the public projection of its subject.
pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;

    let user = state
        .auth_service
        .current_user(token)
        .await?
        .ok_or(AppError::Auth(AuthError::InvalidToken))?;

    Ok(HttpResponse::Ok().json(user))
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Auth(AuthError::MissingToken))
}
