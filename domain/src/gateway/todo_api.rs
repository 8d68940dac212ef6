use crate::error::{AuthErrorKind, DomainErrorKind, Error, ExternalErrorKind, InternalErrorKind};
use log::*;
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use service::config::Config;
use todo_auth::http::{Anonymous, AuthenticatedClient, AuthenticatedClientBuilder};
use todo_auth::session::TokenStore;

/// Client for the todo REST API.
///
/// Authenticated calls go through the bearer/refresh middleware; the `/auth` endpoints
/// are sent as [`Anonymous`] requests.
#[derive(Clone)]
pub struct TodoApiClient {
    client: AuthenticatedClient,
    base_url: String,
    store: TokenStore,
    premium_group: String,
}

/// Error body the API sends alongside non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl TodoApiClient {
    pub fn new(config: &Config, store: TokenStore) -> Result<Self, Error> {
        let client = AuthenticatedClientBuilder::new(config.api_base_url(), store.clone())
            .with_timeout(config.request_timeout())
            .with_max_retries(config.max_retries)
            .build()
            .map_err(|err| {
                warn!("Failed to build HTTP client: {err:?}");
                Error {
                    source: Some(Box::new(err)),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
                }
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url().to_string(),
            store,
            premium_group: config.premium_group().to_string(),
        })
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn premium_group(&self) -> &str {
        &self.premium_group
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let response = self.send(Method::GET, path, None::<&()>, false).await?;
        decode(response).await
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self.send(Method::POST, path, Some(body), false).await?;
        decode(response).await
    }

    /// POST whose response body is ignored.
    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), Error> {
        self.send(Method::POST, path, Some(body), false).await?;
        Ok(())
    }

    /// POST without bearer or refresh handling. An empty or unexpected success body
    /// decodes to `T::default()`.
    pub(crate) async fn post_anonymous<B: Serialize, T: DeserializeOwned + Default>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let response = self.send(Method::POST, path, Some(body), true).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text).unwrap_or_else(|err| {
            debug!("Ignoring undecodable body from {path}: {err}");
            T::default()
        }))
    }

    /// PUT whose response body is ignored.
    pub(crate) async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<(), Error> {
        self.send(Method::PUT, path, Some(body), false).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(Method::DELETE, path, None::<&()>, false).await?;
        Ok(())
    }

    /// Send a request and turn non-success statuses into domain errors.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        anonymous: bool,
    ) -> Result<reqwest::Response, Error> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");

        let mut request = self.client.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if anonymous {
            request = request.with_extension(Anonymous);
        }

        let response = request.send().await.map_err(|err| {
            warn!("{method} {path} failed: {err}");
            Error::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.message);
        warn!("{method} {path} returned {status}");

        if status == StatusCode::UNAUTHORIZED && !anonymous {
            // The middleware already refreshed and replayed once.
            if let Err(err) = self.store.clear().await {
                warn!("Failed to clear session after rejected replay: {err}");
            }
            return Err(Error::new(DomainErrorKind::Auth(AuthErrorKind::LoginRequired)));
        }

        Err(Error::new(DomainErrorKind::External(ExternalErrorKind::Api {
            status: status.as_u16(),
            message,
        })))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|err| {
        warn!("Failed to decode response body: {err}");
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::InvalidResponse),
        }
    })
}

/// Percent-encode an id for use as a single path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
