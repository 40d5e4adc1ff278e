//! Capabilities the client consumes: an HTTP transport and a sleep primitive.
//!
//! The client never opens sockets itself. Every request is handed to a
//! [`Transport`] as an [`HttpRequest`], and every rate-limit wait goes through
//! a [`Sleep`] implementation, so both can be swapped in tests.

use crate::error::TransportError;

use indexmap::IndexMap;
use std::{fmt, ops, thread, time};

/// HTTP method of a request.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Method {
    /// `DELETE`
    Delete,
    /// `GET`
    #[default]
    Get,
    /// `PATCH`
    Patch,
    /// `POST`
    Post,
    /// `PUT`
    Put,
}

impl ops::Deref for Method {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Delete => "DELETE",
            Self::Get => "GET",
            Self::Patch => "PATCH",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

/// A fully composed HTTP request.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HttpRequest {
    /// Request body, already serialized.
    pub body: Option<String>,
    /// Value of the `Content-Type` header, when a body is sent.
    pub content_type: Option<String>,
    /// Request headers, authorization included.
    pub headers: IndexMap<String, String>,
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
}

/// The raw outcome of an HTTP call.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HttpResponse {
    /// Response body as text.
    pub body: String,
    /// Response headers.
    pub headers: IndexMap<String, String>,
    /// HTTP status code.
    pub status_code: u16,
}

impl HttpResponse {
    /// Build a response with the given status and body and no headers.
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status_code,
            ..Default::default()
        }
    }
}

/// Performs HTTP calls on behalf of the client.
///
/// Implementations own timeouts and cancellation. A returned `Err` is
/// propagated to the caller untouched; non-2xx statuses must be returned as
/// `Ok` so that the backend's error body can be collected.
pub trait Transport: Send + Sync {
    /// Perform the request and return the raw response.
    fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking pause used between paced calls, and the clock it is measured on.
pub trait Sleep: Send + Sync {
    /// Block the current thread for `duration`.
    fn sleep(&self, duration: time::Duration);

    /// The current instant. Pauses advance it by at least their duration.
    fn now(&self) -> time::Instant {
        time::Instant::now()
    }
}

/// [`Sleep`] backed by [`std::thread::sleep`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadSleep;

impl Sleep for ThreadSleep {
    fn sleep(&self, duration: time::Duration) {
        thread::sleep(duration);
    }
}

/// Blocking HTTPS transport built on `reqwest`.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

#[cfg(feature = "reqwest")]
impl ReqwestTransport {
    /// Wrap an already configured blocking client.
    pub fn new(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "reqwest")]
impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Delete => Self::DELETE,
            Method::Get => Self::GET,
            Method::Patch => Self::PATCH,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
        }
    }
}

#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
    fn fetch(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(content_type) = request.content_type {
            builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send()?;
        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let body = response.text()?;
        Ok(HttpResponse {
            body,
            headers,
            status_code,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::delete(Method::Delete, "DELETE")]
    #[case::get(Method::Get, "GET")]
    #[case::patch(Method::Patch, "PATCH")]
    #[case::post(Method::Post, "POST")]
    #[case::put(Method::Put, "PUT")]
    fn test_method_to_str(#[case] method: Method, #[case] expected: &str) {
        assert_eq!(&*method, expected);
        assert_eq!(method.to_string(), expected);
    }

    #[test]
    fn test_mock_transport_replays_in_order() {
        let transport = mock::MockTransport::new(["first", "second"]);
        transport.push_failure("boom");
        let first = transport.fetch(HttpRequest::default()).unwrap();
        let second = transport.fetch(HttpRequest::default()).unwrap();
        let third = transport.fetch(HttpRequest::default());
        assert_eq!(first.body, "first");
        assert_eq!(second.body, "second");
        assert_eq!(third.unwrap_err().to_string(), "boom");
        assert_eq!(transport.requests().len(), 3);
    }

    #[test]
    fn test_mock_sleep_advances_clock() {
        let sleep = mock::MockSleep::default();
        let start = sleep.now();
        sleep.sleep(time::Duration::from_secs(3));
        sleep.sleep(time::Duration::from_secs(4));
        assert_eq!(sleep.now() - start, time::Duration::from_secs(7));
        assert_eq!(sleep.durations().len(), 2);
    }
}
