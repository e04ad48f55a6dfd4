//! Signed-in user's profile.

use iv_core::entities::{PasswordChange, ProfileUpdate, UserProfile};
use reqwest::Method;

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /profile`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/profile").await
    }

    /// `PUT /profile`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        self.send_json(Method::PUT, "/profile", update).await
    }

    /// `PUT /profile/password`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the new password is blank or equal
    /// to the current one, otherwise any request failure.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        if change.new_password.trim().is_empty() {
            return Err(ApiError::Validation("new password is required".into()));
        }
        if change.new_password == change.current_password {
            return Err(ApiError::Validation(
                "new password must differ from the current one".into(),
            ));
        }
        self.send_discard(Method::PUT, "/profile/password", Some(change))
            .await
    }
}
