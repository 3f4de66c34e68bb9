//! HTTP client for the booking backend.
//!
//! Wraps `reqwest` with typed response deserialization and a single generic
//! GET-JSON helper. Non-2xx responses surface the backend's `error` message as
//! [`CalendarError::Api`] when one is present.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, StatusCode, Url};
use studiocal_core::AppConfig;

use crate::error::CalendarError;
use crate::types::{CalendarGrid, CreateBookingRequest, CreateBookingResponse, ErrorBody};

/// Client for the booking-calendar REST API.
///
/// Manages the HTTP client and base URL. Use [`CalendarClient::from_config`]
/// for production or [`CalendarClient::new`] to point at a mock server in
/// tests.
pub struct CalendarClient {
    client: Client,
    base_url: Url,
}

impl CalendarClient {
    /// Creates a new client against `base_url` (including the API prefix,
    /// e.g. `http://localhost:3000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CalendarError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, CalendarError> {
        Self::with_user_agent(base_url, timeout_secs, "studiocal/0.1 (booking-calendar)")
    }

    /// Creates a new client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CalendarClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CalendarError> {
        Self::with_user_agent(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    fn with_user_agent(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CalendarError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| CalendarError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches the occupancy grid for `date`, optionally restricted to one
    /// studio.
    ///
    /// Calls `GET booking-calendar?date=yyyy-MM-dd[&studioId=...]`.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::Api`] if the backend returns a non-2xx status.
    /// - [`CalendarError::Http`] on network failure.
    /// - [`CalendarError::Deserialize`] if the response does not match the
    ///   grid shape.
    pub async fn fetch_calendar(
        &self,
        date: NaiveDate,
        studio_id: Option<&str>,
    ) -> Result<CalendarGrid, CalendarError> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let mut params = vec![("date", date_str.as_str())];
        if let Some(id) = studio_id.filter(|id| !id.is_empty()) {
            params.push(("studioId", id));
        }

        let url = self.build_url("booking-calendar", &params)?;
        let body = self.get_json(&url).await?;
        serde_json::from_value(body).map_err(|e| CalendarError::Deserialize {
            context: format!("fetch_calendar(date={date_str})"),
            source: e,
        })
    }

    /// Creates a booking; a pass-through to `POST bookings` with no
    /// client-side legality checks (conflict validation lives server-side).
    ///
    /// # Errors
    ///
    /// - [`CalendarError::Api`] if the backend rejects the booking; carries
    ///   the backend's `error` message when one parses.
    /// - [`CalendarError::Http`] on network failure.
    /// - [`CalendarError::Deserialize`] if the acknowledgment does not match
    ///   the expected shape.
    pub async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<CreateBookingResponse, CalendarError> {
        let url = self.build_url("bookings", &[])?;
        let response = self.client.post(url.clone()).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| CalendarError::Deserialize {
            context: format!("create_booking(studio={})", request.studio_id),
            source: e,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, CalendarError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| CalendarError::Api(format!("invalid endpoint path '{path}': {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Api`] on a non-2xx status, [`CalendarError::Http`]
    /// on network failure, and [`CalendarError::Deserialize`] if the body is
    /// not valid JSON.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, CalendarError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| CalendarError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Builds an [`CalendarError::Api`] from a failed response, preferring the
    /// backend's own `{"error": ...}` message over the bare status code.
    fn api_error(status: StatusCode, body: &str) -> CalendarError {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => CalendarError::Api(format!("{status}: {}", parsed.error)),
            Err(_) => CalendarError::Api(format!("request failed with status {status}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CalendarClient {
        CalendarClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn build_url_joins_endpoint_path() {
        let client = test_client("http://localhost:3000/api");
        let url = client
            .build_url("booking-calendar", &[("date", "2024-04-01")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/booking-calendar?date=2024-04-01"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("http://localhost:3000/api/");
        let url = client.build_url("bookings", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/bookings");
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("http://localhost:3000/api");
        let url = client
            .build_url("booking-calendar", &[("studioId", "studio a&b")])
            .unwrap();
        assert!(
            url.as_str().contains("studio+a%26b") || url.as_str().contains("studio%20a%26b"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn api_error_prefers_backend_message() {
        let err = CalendarClient::api_error(
            StatusCode::CONFLICT,
            "{\"error\": \"period already booked\"}",
        );
        assert!(err.to_string().contains("period already booked"), "{err}");
    }

    #[test]
    fn api_error_falls_back_to_status_code() {
        let err = CalendarClient::api_error(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert!(err.to_string().contains("502"), "{err}");
    }
}
