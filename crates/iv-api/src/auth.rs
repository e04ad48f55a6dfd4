//! Login endpoints. These do not touch the session store; callers record the
//! returned token themselves.

use iv_core::entities::{LoginRequest, LoginResponse};
use reqwest::Method;

use crate::{ApiClient, ApiError};

impl ApiClient {
    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = credentials_body(email, password)?;
        self.send_json(Method::POST, "/auth/login", &body).await
    }

    /// `POST /admin/login`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the credentials are rejected.
    pub async fn admin_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let body = credentials_body(email, password)?;
        self.send_json(Method::POST, "/admin/login", &body).await
    }
}

fn credentials_body(email: &str, password: &str) -> Result<LoginRequest, ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation("email and password are required".into()));
    }
    Ok(LoginRequest {
        email: email.trim().to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credentials_rejected_before_sending() {
        assert!(matches!(
            credentials_body(" ", "pw"),
            Err(ApiError::Validation(_))
        ));
        assert!(credentials_body("a@b.c", "").is_err());
        let body = credentials_body(" a@b.c ", "pw").unwrap();
        assert_eq!(body.email, "a@b.c");
    }
}
