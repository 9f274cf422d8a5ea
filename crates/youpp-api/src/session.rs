// Admin session endpoints
//
// Token-based login/logout. Login writes the returned pair into the
// client's token store; every later request picks the access token up
// from there.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use crate::auth::TokenPair;
use crate::client::{ApiClient, RequestOptions};
use crate::error::Error;
use crate::types::{LoginRequest, LoginResponse};

impl ApiClient {
    /// Exchange email + password for a token pair and persist it.
    ///
    /// `POST /api/auth/login`
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<TokenPair, Error> {
        debug!(email, "logging in");

        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let resp: LoginResponse = self
            .request_body("/api/auth/login", RequestOptions::post().json(&body)?)
            .await?;

        let tokens = TokenPair {
            access_token: SecretString::from(resp.access_token),
            refresh_token: SecretString::from(resp.refresh_token),
        };
        self.tokens().set_tokens(&tokens)?;

        info!("login successful");
        Ok(tokens)
    }

    /// Forget the stored token pair. No request is made.
    pub fn logout(&self) -> Result<(), Error> {
        self.tokens().clear_tokens()?;
        info!("logged out");
        Ok(())
    }
}
