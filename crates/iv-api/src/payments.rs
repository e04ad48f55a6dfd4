//! Plan and subscription lookups. Checkout happens in the web app.

use iv_core::entities::{Plan, Subscription};

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// `GET /payments/plans`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn list_plans(&self) -> Result<Vec<Plan>, ApiError> {
        self.get_json("/payments/plans").await
    }

    /// `GET /payments/subscription`. `None` when the account has no subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot be parsed.
    pub async fn subscription(&self) -> Result<Option<Subscription>, ApiError> {
        match self.get_json("/payments/subscription").await {
            Ok(sub) => Ok(sub),
            Err(ApiError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
