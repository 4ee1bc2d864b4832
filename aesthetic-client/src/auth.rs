//! Authentication endpoints

use aesthetic_core::domain::user::User;
use aesthetic_core::dto::auth::{LoginRequest, RegisterUser, TokenResponse};
use reqwest::Method;

use crate::SimulationClient;
use crate::error::Result;

impl SimulationClient {
    /// Log in with username and PIN
    ///
    /// The returned token is not stored; pass it to
    /// [`SimulationClient::set_token`] to authenticate later calls.
    pub async fn login(&self, req: LoginRequest) -> Result<TokenResponse> {
        let response = self
            .request(Method::POST, "/auth/login")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Register a new practitioner account
    pub async fn register(&self, req: RegisterUser) -> Result<User> {
        let response = self
            .request(Method::POST, "/auth/register")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }
}
