use crate::starrocks::{
    config::StreamLoadConfig,
    error::TransportError,
    request::{COLUMNS_HEADER, LABEL_HEADER, LoadRequest},
};
use bytes::Bytes;
use reqwest::{
    StatusCode, Url,
    blocking::{Client, RequestBuilder, Response},
    header::{EXPECT, LOCATION},
    redirect,
};
use std::time::Duration;
use tracing::debug;

pub const MAX_REDIRECTS: usize = 10;

/// Status code and raw body of a load response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResponse {
    pub status: u16,
    pub body: String,
}

impl LoadResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends load requests. Blocking: `send` returns once the whole response is read.
pub trait LoadTransport {
    fn open(&mut self) -> Result<(), TransportError>;

    fn send(&mut self, request: &LoadRequest) -> Result<LoadResponse, TransportError>;
}

/// `reqwest` blocking client that follows redirects for PUT itself.
///
/// The frontend answers a stream load with a redirect to the backend that
/// should receive the data. Following it manually re-sends the same
/// headers and body, `Authorization` included, to a different host.
#[derive(Debug)]
pub struct HttpTransport {
    connect_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    client: Option<Client>,
}

impl HttpTransport {
    pub fn new(config: &StreamLoadConfig) -> Self {
        Self {
            connect_timeout: config.connect_timeout(),
            request_timeout: config.request_timeout(),
            client: None,
        }
    }

    fn put(
        &self,
        client: &Client,
        url: &Url,
        request: &LoadRequest,
        body: &Bytes,
    ) -> RequestBuilder {
        client
            .put(url.clone())
            .header(EXPECT, "100-continue")
            .basic_auth(&request.username, Some(&request.password))
            .header(LABEL_HEADER, request.label.as_str())
            .header(COLUMNS_HEADER, &request.columns)
            .body(body.clone())
    }
}

impl LoadTransport for HttpTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        let mut builder = Client::builder().redirect(redirect::Policy::none());
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        self.client = Some(builder.build()?);
        Ok(())
    }

    fn send(&mut self, request: &LoadRequest) -> Result<LoadResponse, TransportError> {
        let client = self.client.as_ref().ok_or(TransportError::NotOpen)?;
        let mut url = Url::parse(&request.url).map_err(|e| TransportError::InvalidUrl {
            url: request.url.clone(),
            reason: e.to_string(),
        })?;
        let body = Bytes::from(request.body.clone());

        for _ in 0..=MAX_REDIRECTS {
            let response = self
                .put(client, &url, request, &body)
                .send()
                .map_err(|e| classify_send_error(e, &url))?;

            if let Some(next) = redirect_target(&response, &url)? {
                debug!(
                    from = %url,
                    to = %next,
                    label = %request.label,
                    "Following stream load redirect"
                );
                url = next;
                continue;
            }

            let status = response.status().as_u16();
            let body = response.text().map_err(|e| classify_send_error(e, &url))?;
            return Ok(LoadResponse { status, body });
        }

        Err(TransportError::TooManyRedirects {
            limit: MAX_REDIRECTS,
            url: url.to_string(),
        })
    }
}

fn classify_send_error(err: reqwest::Error, url: &Url) -> TransportError {
    if err.is_connect() || err.is_timeout() {
        TransportError::Unreachable {
            url: url.to_string(),
            reason: err.to_string(),
        }
    } else {
        TransportError::Http(err)
    }
}

fn redirect_target(response: &Response, current: &Url) -> Result<Option<Url>, TransportError> {
    let followed = matches!(
        response.status(),
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    );
    if !followed {
        return Ok(None);
    }

    // A redirect without a usable Location is handed back as a plain response.
    let Some(location) = response.headers().get(LOCATION).and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };

    current
        .join(location)
        .map(Some)
        .map_err(|e| TransportError::InvalidUrl {
            url: location.to_string(),
            reason: e.to_string(),
        })
}
