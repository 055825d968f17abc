use crate::domain::user::{CreateUser, LoginRequest, UserProfile};
use crate::presentation::handlers::{ApiError, AppState, CookieSettings, MessageResponse};
use crate::presentation::middleware::{AuthenticatedUser, TOKEN_COOKIE};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{error, info, instrument};

#[derive(Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

fn token_cookie(token: String, settings: CookieSettings) -> Cookie<'static> {
    let builder = Cookie::build(TOKEN_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::hours(settings.max_age_hours as i64));
    // Cross-site browsers only send SameSite=None cookies when they are Secure.
    let builder = if settings.secure {
        builder.secure(true).same_site(SameSite::None)
    } else {
        builder.same_site(SameSite::Lax)
    };
    builder.finish()
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<CreateUser>,
) -> Result<HttpResponse, ApiError> {
    info!("Signup request received");

    let user = state
        .auth_service
        .register_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    info!(user_id = %user.id, "User created successfully");
    Ok(HttpResponse::Created().json(SignupResponse {
        message: "User created successfully".to_string(),
        user: UserProfile::from(&user),
    }))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let (token, user) = state
        .auth_service
        .login(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to login");
            ApiError::from(e)
        })?;

    let cookie = token_cookie(token.clone(), state.cookies);
    info!(user_id = %user.id, "Login successful");
    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        token,
        user: UserProfile::from(&user),
    }))
}

#[instrument(skip(state))]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let mut cookie = token_cookie(String::new(), state.cookies);
    cookie.make_removal();
    HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::new("Logged out"))
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn me(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let profile = state.auth_service.profile(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(&profile)))
}
