use crate::config::ApiConfig;
use crate::models::{FlightOption, FlightsResponse, Route, RoutesResponse};
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid header value for {name}")]
    InvalidHeader { name: &'static str },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Client for the airline's routes and flights endpoints.
pub struct FareApi {
    client: Client,
    base_url: String,
    passengers: u32,
}

fn header(name: &'static str, value: String) -> Result<HeaderValue, ApiError> {
    let mut value = HeaderValue::from_str(&value).map_err(|_| ApiError::InvalidHeader { name })?;
    value.set_sensitive(true);
    Ok(value)
}

impl FareApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            header("Authorization", format!("Bearer {}", config.api_key))?,
        );
        headers.insert(
            HeaderName::from_static("x-client-id"),
            header("X-Client-ID", config.client_id.clone())?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            passengers: config.passengers,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every route departing from `origin`.
    pub async fn fetch_routes(&self, origin: &str) -> Result<Vec<Route>, ApiError> {
        let url = format!("{}/routes", self.base_url);
        debug!("GET {} departure={}", url, origin);

        let res = self
            .client
            .get(url)
            .query(&[("departure", origin)])
            .send()
            .await?
            .error_for_status()?
            .json::<RoutesResponse>()
            .await?;

        Ok(res.routes)
    }

    /// Flight options on one route for one outbound date.
    pub async fn fetch_flights(
        &self,
        origin: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<FlightOption>, ApiError> {
        let url = format!("{}/flights", self.base_url);
        let date = date.format("%Y-%m-%d").to_string();
        let adult = self.passengers.to_string();
        debug!("GET {} {}->{} on {}", url, origin, destination, date);

        let res = self
            .client
            .get(url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("outboundDate", date.as_str()),
                ("adult", adult.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<FlightsResponse>()
            .await?;

        Ok(res.flights)
    }
}
