//! User endpoints: login, registration, profile lookups.

use serde_json::json;

use crate::client::{ApiClient, Auth};
use crate::error::{ApiError, ApiResult};
use crate::forms::{normalize_identifier, LoginForm, RegisterForm};
use crate::models::{AuthResponse, User, UserEnvelope};
use crate::session::SessionPersistence;

impl<S: SessionPersistence> ApiClient<S> {
    /// Signs in and stores the returned session.
    ///
    /// Blank credentials are rejected without touching the network.
    pub async fn login(&self, form: &LoginForm) -> ApiResult<User> {
        form.validate()?;
        let response: AuthResponse = self.post("/users/check-login", form, Auth::Public).await?;
        self.store_session(response)
    }

    /// Creates an account and stores the returned session.
    ///
    /// A password/confirmation mismatch is rejected without touching the network.
    pub async fn register(&self, form: &RegisterForm) -> ApiResult<User> {
        form.validate()?;
        let response: AuthResponse = self.post("/users/Create-user", form, Auth::Public).await?;
        self.store_session(response)
    }

    /// Forgets the stored session. The backend keeps no logout state.
    pub fn logout(&self) -> ApiResult<()> {
        self.session_store().clear_session()?;
        tracing::info!("Signed out");
        Ok(())
    }

    /// Resolves the signed-in user from the stored token and refreshes the
    /// stored user id.
    pub async fn current_user(&self) -> ApiResult<User> {
        let token = self
            .session_store()
            .token()?
            .ok_or(ApiError::AuthRequired)?;
        let envelope: UserEnvelope = self
            .post("/users/get-user-info", &json!({ "token": token }), Auth::Required)
            .await?;
        self.session_store().set_session(&token, &envelope.user.id)?;
        Ok(envelope.user)
    }

    pub async fn user_by_id(&self, user_id: &str) -> ApiResult<User> {
        let user_id = normalize_identifier("User", user_id)?;
        let envelope: UserEnvelope = self
            .post("/users/get-user", &json!({ "userId": user_id }), Auth::Public)
            .await?;
        Ok(envelope.user)
    }

    fn store_session(&self, response: AuthResponse) -> ApiResult<User> {
        self.session_store()
            .set_session(&response.token, &response.user.id)?;
        tracing::info!("Signed in as {}", response.user.username);
        Ok(response.user)
    }
}
