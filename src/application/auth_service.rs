use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, User, normalize_email};
use crate::infrastructure::security::{generate_token, hash_password, verify_password};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    token_ttl_secs: u64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, token_ttl_secs: u64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl_secs,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email, role = %req.role))]
    pub async fn register_user(&self, req: CreateUser) -> Result<User> {
        trace!("Starting user registration");
        let req = req.normalize()?;

        if self.user_repository.find_user_by_email(&req.email).await?.is_some() {
            warn!(email = %req.email, "User already exists");
            return Err(DomainError::Validation("Email already registered".to_string()).into());
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            full_name: req.full_name,
            email: req.email,
            password_hash,
            role: req.role,
            applied_jobs: Vec::new(),
            created_at: Utc::now(),
        };

        debug!(user_id = %user.id, "Saving user to repository");
        self.user_repository.save_user(user.clone()).await?;

        info!(user_id = %user.id, email = %user.email, role = %user.role, "User registered successfully");
        Ok(user)
    }

    /// Returns the signed token together with the user it was issued for.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<(String, User)> {
        trace!("Starting login");
        let invalid = || DomainError::Unauthorized("Invalid credentials".to_string());

        let user = self
            .user_repository
            .find_user_by_email(&normalize_email(&req.email))
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "User not found during login");
                invalid()
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(invalid().into());
        }

        let token = generate_token(&user.id, user.role, &self.jwt_secret, self.token_ttl_secs)
            .map_err(|e| {
                error!(error = %e, "Failed to generate token");
                DomainError::Internal(format!("Failed to generate token: {}", e))
            })?;

        info!(user_id = %user.id, role = %user.role, "Login successful");
        Ok((token, user))
    }

    #[instrument(skip(self))]
    pub async fn profile(&self, user_id: &str) -> Result<User> {
        self.user_repository
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = user_id, "Authenticated user no longer exists");
                DomainError::NotFound("User not found".to_string()).into()
            })
    }
}
