use std::collections::HashMap;

use crate::MashovError;
use core::future::Future;

/// A fully read HTTP response.
#[derive(Clone, Debug, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Header entries in the order they were received. Repeated headers keep one entry each.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup. Repeated headers are folded into a single
    /// value joined with `", "`.
    pub fn header(&self, name: &str) -> Option<String> {
        let values = self
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>();

        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }
}

pub trait MashovHttpClient: Clone + Send + 'static {
    fn new() -> Result<Self, MashovError>;

    fn get(
        &self,
        url: &str,
        headers: HashMap<String, String>,
    ) -> impl Future<Output = Result<HttpResponse, MashovError>> + Send;

    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: HashMap<String, String>,
    ) -> impl Future<Output = Result<HttpResponse, MashovError>> + Send;
}

#[cfg(feature = "reqwest")]
fn convert_headers(
    headers: &HashMap<String, String>,
) -> Result<reqwest::header::HeaderMap, MashovError> {
    use crate::{errors::ErrorKind, this_errors};

    let mut map = reqwest::header::HeaderMap::with_capacity(headers.len());

    for (k, v) in headers {
        let name = this_errors!(
            ErrorKind::Transport => "failed to convert header name",
            reqwest::header::HeaderName::from_bytes(k.as_bytes())
        );
        let value = this_errors!(
            ErrorKind::Transport => "failed to convert header value",
            reqwest::header::HeaderValue::from_str(v.as_str())
        );
        map.insert(name, value);
    }

    Ok(map)
}

#[cfg(feature = "reqwest")]
async fn read_response(resp: reqwest::Response) -> Result<HttpResponse, MashovError> {
    use crate::{errors::ErrorKind, this_errors};

    let status = resp.status().as_u16();

    // Non-UTF-8 header values cannot carry anything this client reads.
    let headers = resp
        .headers()
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|v| (k.as_str().to_string(), v.to_string()))
        })
        .collect();

    let bytes = this_errors!(
        ErrorKind::Transport => "failed to get response bytes",
        resp.bytes().await
    );

    Ok(HttpResponse {
        status,
        headers,
        body: bytes.to_vec(),
    })
}

#[cfg(feature = "reqwest")]
impl MashovHttpClient for reqwest::Client {
    fn new() -> Result<Self, MashovError> {
        use crate::{errors::ErrorKind, this_errors};

        let client = this_errors!(
            ErrorKind::Transport => "failed to build http client",
            reqwest::Client::builder().gzip(true).referer(false).build()
        );

        Ok(client)
    }

    fn get(
        &self,
        url: &str,
        headers: HashMap<String, String>,
    ) -> impl Future<Output = Result<HttpResponse, MashovError>> {
        use crate::{errors::ErrorKind, this_errors};

        let url = url.to_string();

        async move {
            let url = this_errors!(
                ErrorKind::Transport => "failed to parse url",
                reqwest::Url::parse(&url)
            );

            let headers = convert_headers(&headers)?;

            let resp = this_errors!(
                ErrorKind::Transport => "failed to send get request",
                self.get(url).headers(headers).send().await
            );

            read_response(resp).await
        }
    }

    fn post(
        &self,
        url: &str,
        body: Vec<u8>,
        headers: HashMap<String, String>,
    ) -> impl Future<Output = Result<HttpResponse, MashovError>> {
        use crate::{errors::ErrorKind, this_errors};

        let url = url.to_string();

        async move {
            let url = this_errors!(
                ErrorKind::Transport => "failed to parse url",
                reqwest::Url::parse(&url)
            );

            let headers = convert_headers(&headers)?;

            let resp = this_errors!(
                ErrorKind::Transport => "failed to send post request",
                self.post(url).body(body).headers(headers).send().await
            );

            read_response(resp).await
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::{
        collections::{HashMap, VecDeque},
        sync::{Arc, Mutex},
    };

    use super::{HttpResponse, MashovHttpClient};
    use crate::MashovError;

    #[derive(Clone, Debug)]
    pub(crate) struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub headers: HashMap<String, String>,
        pub body: Option<Vec<u8>>,
    }

    /// Replays queued responses in order and records every request it sees.
    #[derive(Clone, Default)]
    pub(crate) struct FakeClient {
        responses: Arc<Mutex<VecDeque<HttpResponse>>>,
        requests: Arc<Mutex<Vec<RecordedRequest>>>,
    }

    impl FakeClient {
        pub fn respond(&self, status: u16, headers: &[(&str, &str)], body: &str) {
            self.responses.lock().unwrap().push_back(HttpResponse {
                status,
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                body: body.as_bytes().to_vec(),
            });
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn next(&self, request: RecordedRequest) -> HttpResponse {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no canned response queued")
        }
    }

    impl MashovHttpClient for FakeClient {
        fn new() -> Result<Self, MashovError> {
            Ok(Self::default())
        }

        async fn get(
            &self,
            url: &str,
            headers: HashMap<String, String>,
        ) -> Result<HttpResponse, MashovError> {
            Ok(self.next(RecordedRequest {
                method: "GET",
                url: url.to_string(),
                headers,
                body: None,
            }))
        }

        async fn post(
            &self,
            url: &str,
            body: Vec<u8>,
            headers: HashMap<String, String>,
        ) -> Result<HttpResponse, MashovError> {
            Ok(self.next(RecordedRequest {
                method: "POST",
                url: url.to_string(),
                headers,
                body: Some(body),
            }))
        }
    }
}
