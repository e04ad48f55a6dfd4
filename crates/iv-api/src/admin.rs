//! Admin console endpoints. Build the client with admin credentials.

use iv_core::entities::{AdminSettings, AdminUser, SystemHealth};
use reqwest::Method;

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /admin/settings`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn admin_settings(&self) -> Result<AdminSettings, ApiError> {
        self.get_json("/admin/settings").await
    }

    /// `PUT /admin/settings` with the keys to change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for an empty change set, otherwise any
    /// request or parse failure.
    pub async fn update_admin_settings(
        &self,
        changes: &AdminSettings,
    ) -> Result<AdminSettings, ApiError> {
        if changes.is_empty() {
            return Err(ApiError::Validation("no settings given".into()));
        }
        self.send_json(Method::PUT, "/admin/settings", changes).await
    }

    /// `GET /admin/users`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn admin_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get_json("/admin/users").await
    }

    /// `GET /admin/system/health`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn system_health(&self) -> Result<SystemHealth, ApiError> {
        self.get_json("/admin/system/health").await
    }
}
