use std::collections::HashMap;

use crate::{
    MashovError,
    auth::session::SessionCredentials,
    connection::Connection,
    error,
    errors::ErrorKind,
    http::client::{HttpResponse, MashovHttpClient},
    this_errors,
};
use derive_builder::Builder;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

pub mod client;
pub mod login;
mod macros;
mod url;

pub(crate) use macros::headers;

pub(crate) static BASE_API_URL: &str = "https://web.mashov.info/api";

/// Headers the portal's web client sends on every request.
fn common_headers() -> HashMap<String, String> {
    headers!(
        (
            "User-Agent",
            "Mozilla/5.0 (X11; Linux x86_64; rv:147.0) Gecko/20100101 Firefox/147.0"
        ),
        ("Accept", "application/json, text/plain, */*"),
        ("Accept-Language", "en-US,en;q=0.9"),
        ("Sec-GPC", "1"),
        ("Sec-Fetch-Dest", "empty"),
        ("Sec-Fetch-Mode", "cors"),
        ("Sec-Fetch-Site", "same-origin"),
    )
}

#[derive(Builder)]
pub(crate) struct Request<C: MashovHttpClient + Clone> {
    connection: Connection<C>,

    /// Path segments appended to the base url. Each one is percent-encoded.
    #[builder(setter(into))]
    segments: Vec<String>,

    #[builder(setter(into, strip_option), default = None)]
    credentials: Option<SessionCredentials>,
}

impl<C: MashovHttpClient + Clone> Request<C> {
    fn build_url(&self) -> Result<String, MashovError> {
        let conn_opts = self.connection.get_opts();
        let base = conn_opts.host.as_deref().unwrap_or(BASE_API_URL);
        let segments = self.segments.iter().map(String::as_str).collect::<Vec<_>>();

        let url = this_errors!(
            "failed to construct url",
            url::construct_url(base, &segments)
        );

        Ok(url)
    }

    fn build_headers(&self) -> HashMap<String, String> {
        let mut headers = common_headers();

        if let Some(credentials) = self.credentials.as_ref() {
            headers.extend(headers!(
                ("X-Csrf-Token", credentials.anti_forgery_token.as_str()),
                ("Cookie", credentials.session_cookie.as_str()),
            ));
        }

        headers
    }

    /// Sends `body` as JSON and hands back the raw response, whatever its status.
    pub async fn post<B: Serialize>(self, body: &B) -> Result<HttpResponse, MashovError> {
        let url = self.build_url()?;
        let mut headers = self.build_headers();

        headers.insert("Content-Type".into(), "application/json".into());

        let body_bytes = this_errors!(
            "failed to serialise body as json",
            serde_json::to_vec(body)
        );

        debug!(path = %self.segments.join("/"), "POST");

        let resp = self
            .connection
            .get_client()
            .post(url.as_str(), body_bytes, headers)
            .await?;

        Ok(resp)
    }

    /// Fetches the url and decodes a 2xx JSON body into `T`.
    pub async fn get<T: DeserializeOwned>(self) -> Result<T, MashovError> {
        let url = self.build_url()?;
        let headers = self.build_headers();
        let path = self.segments.join("/");

        debug!(path = %path, "GET");

        let resp = self
            .connection
            .get_client()
            .get(url.as_str(), headers)
            .await?;

        if !resp.is_success() {
            warn!(path = %path, status = resp.status, "request rejected");
            return Err(error!(
                ErrorKind::RequestFailed(resp.status) =>
                format!("request failed with status {}", resp.status)
            ));
        }

        let decoded = this_errors!(
            ErrorKind::Decode => "failed to parse response as json",
            serde_json::from_slice::<Option<T>>(&resp.body)
        );

        decoded.ok_or_else(|| error!(ErrorKind::Decode => "response body was empty"))
    }
}
