use std::time::Duration;

use client_logging::client_debug;
use reqwest::{multipart, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{FailureKind, RequestError, SessionContext};

pub const DEFAULT_API_BASE: &str = "https://ai-doc-management.onrender.com/api/";

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub base_url: Url,
    /// `None` leaves the call unbounded, like the rest of the client.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl GatewaySettings {
    /// Relative endpoint paths are joined onto `base_url`, so it always gets a
    /// trailing slash.
    pub fn new(mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            connect_timeout: None,
            request_timeout: None,
        }
    }

    pub fn parse(base_url: &str) -> Result<Self, RequestError> {
        let url = Url::parse(base_url)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self::new(url))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Dispatches requests against the fixed backend base address, attaching the
/// session's bearer token when one is stored. One attempt per call; a 401 is
/// reported like any other status.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl Gateway {
    pub fn new(settings: GatewaySettings, session: SessionContext) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.base_url,
            session,
        })
    }

    pub async fn get(&self, path: &str) -> Result<Response, RequestError> {
        let url = self.endpoint(path)?;
        self.dispatch(self.client.get(url)).await
    }

    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<Response, RequestError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        self.dispatch(self.client.post(url).json(body)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: multipart::Form,
    ) -> Result<Response, RequestError> {
        let url = self.endpoint(path)?;
        self.dispatch(self.client.post(url).multipart(form)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Response, RequestError> {
        let url = self.endpoint(path)?;
        self.dispatch(self.client.delete(url)).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, RequestError> {
        self.base_url
            .join(path)
            .map_err(|err| RequestError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn dispatch(&self, builder: RequestBuilder) -> Result<Response, RequestError> {
        // The token is read at dispatch time, not when the gateway was built.
        let builder = match self.session.access_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        client_debug!("{} {}", response.url(), status);
        if !status.is_success() {
            let server_message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error);
            return Err(
                RequestError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
                    .with_server_message(server_message),
            );
        }
        Ok(response)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RequestError {
    if err.is_timeout() {
        return RequestError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return RequestError::new(FailureKind::Decode, err.to_string());
    }
    RequestError::new(FailureKind::Network, err.to_string())
}

pub(crate) async fn decode_json<T>(response: Response) -> Result<T, RequestError>
where
    T: for<'de> Deserialize<'de>,
{
    response
        .json::<T>()
        .await
        .map_err(|err| RequestError::new(FailureKind::Decode, err.to_string()))
}
