//! Bearer attachment and refresh-on-401 middleware.

use http::Extensions;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{Middleware, Next};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{token_error, Error, ErrorKind, HttpErrorKind, TokenErrorKind};
use crate::session::TokenStore;

/// Request extension that opts a request out of bearer attachment and refresh handling.
///
/// Used for the login, registration and confirmation endpoints, where a 401 means
/// bad credentials rather than an expired session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

/// Set once a request has gone through a refresh, so its replay is never refreshed again.
#[derive(Debug, Clone, Copy)]
struct RefreshAttempted;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Tokens returned by the refresh endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Attaches the session's bearer token and recovers from a single 401 per request.
///
/// On a 401 the middleware refreshes the access token once and replays the original
/// request. Without a refresh token, or when the refresh fails, the session is cleared
/// and an error with [`Error::requires_login`] set is returned.
///
/// Concurrent 401s each trigger their own refresh; the token store keeps whichever
/// result is written last.
pub struct RefreshMiddleware {
    store: TokenStore,
    http: reqwest::Client,
    refresh_url: String,
}

impl RefreshMiddleware {
    /// # Arguments
    ///
    /// * `store` - Session token store shared with the rest of the client
    /// * `http` - Plain client used for the refresh call itself (must not carry this middleware)
    /// * `refresh_url` - Absolute URL of the refresh endpoint
    pub fn new(store: TokenStore, http: reqwest::Client, refresh_url: String) -> Self {
        Self {
            store,
            http,
            refresh_url,
        }
    }

    async fn refresh(&self, refresh_token: &SecretString) -> Result<RefreshResponse, Error> {
        debug!("Refreshing access token");

        let response = self
            .http
            .post(&self.refresh_url)
            .json(&RefreshRequest {
                refresh_token: refresh_token.expose_secret(),
            })
            .send()
            .await
            .map_err(refresh_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(token_error(
                TokenErrorKind::RefreshFailed,
                &format!("Refresh endpoint returned {status}"),
            ));
        }

        response.json().await.map_err(refresh_failed)
    }

    async fn clear_session(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear session after authentication failure: {e}");
        }
    }
}

#[async_trait::async_trait]
impl Middleware for RefreshMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if extensions.get::<Anonymous>().is_some() {
            return next.run(req, extensions).await;
        }

        if let Some(access_token) = self.store.access_token().await {
            set_bearer(&mut req, &access_token).map_err(into_middleware_error)?;
        }

        let replay = req.try_clone();
        let response = next.clone().run(req, extensions).await?;

        if response.status() != StatusCode::UNAUTHORIZED
            || extensions.get::<RefreshAttempted>().is_some()
        {
            return Ok(response);
        }
        extensions.insert(RefreshAttempted);

        let Some(mut replay) = replay else {
            warn!("Received 401 for a request that cannot be replayed");
            return Ok(response);
        };

        let Some(refresh_token) = self.store.refresh_token().await else {
            info!("Received 401 without a refresh token, clearing session");
            self.clear_session().await;
            return Err(into_middleware_error(token_error(
                TokenErrorKind::MissingRefreshToken,
                "No refresh token available",
            )));
        };

        let refreshed = match self.refresh(&refresh_token).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                warn!("Token refresh failed, clearing session: {e}");
                self.clear_session().await;
                return Err(into_middleware_error(e));
            }
        };

        let access_token = SecretString::new(refreshed.access_token.clone());
        self.store
            .replace_access(refreshed.access_token, refreshed.id_token)
            .await
            .map_err(into_middleware_error)?;
        debug!("Access token refreshed, replaying {} {}", replay.method(), replay.url());

        set_bearer(&mut replay, &access_token).map_err(into_middleware_error)?;
        next.run(replay, extensions).await
    }
}

fn set_bearer(req: &mut Request, token: &SecretString) -> Result<(), Error> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|err| Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
        })?;
    value.set_sensitive(true);
    req.headers_mut().insert(AUTHORIZATION, value);
    Ok(())
}

fn refresh_failed(err: reqwest::Error) -> Error {
    Error {
        source: Some(Box::new(err)),
        error_kind: ErrorKind::Token(TokenErrorKind::RefreshFailed),
    }
}

fn into_middleware_error(err: Error) -> reqwest_middleware::Error {
    reqwest_middleware::Error::Middleware(anyhow::Error::new(err))
}
