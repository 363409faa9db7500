//! Sign-in, sign-out and password recovery.

use voyage_core::error::CoreError;
use voyage_core::models::auth::{ForgotPasswordRequest, ResetPasswordRequest};
use voyage_core::models::{LoginRequest, LoginResponse};

use super::ProfileService;
use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Sign in as an administrator.
    ///
    /// The token, role, name and email go to the scope picked by
    /// `remember`; the other scope is cleared. A non-admin account is
    /// signed straight back out and refused. On success the profile is
    /// fetched so the session also carries the profile image.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let login: LoginResponse = self.api.post_json("/auth/login", &body).await?;

        let session = self.api.session();
        session.store_login(&login, remember)?;

        if !login.is_admin() {
            tracing::warn!(email = %login.email, role = %login.role, "Non-admin login refused");
            session.logout()?;
            return Err(CoreError::Forbidden("Access denied: admin only.".into()).into());
        }

        tracing::info!(email = %login.email, remember, "Admin signed in");

        if let Err(e) = ProfileService::new(self.api.clone()).get().await {
            tracing::warn!(error = %e, "Profile refresh after login failed");
        }
        Ok(login)
    }

    /// Clear both session scopes. No request is made.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.api.session().logout()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Returns the backend's plain-text acknowledgement.
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let body = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.api.post_text("/auth/forgot-password", &body).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<String, ApiError> {
        let body = ResetPasswordRequest {
            token: token.to_string(),
            new_password: new_password.to_string(),
        };
        self.api.post_text("/auth/reset-password", &body).await
    }
}
