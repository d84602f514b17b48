//! Places lookup — finds nearby organizations for a service category.
//!
//! Default backend: Google Places Text Search. `AppState` carries an
//! `Option<Arc<dyn PlaceSearch>>`; `None` means places lookups are switched off.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::demo::matched_categories;
use crate::models::Resource;

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";

/// Search term used when the needs text matches no known category.
pub const FALLBACK_SEARCH_TERM: &str = "social services";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Google Places API key not configured - please add your real API key")]
    MissingApiKey,

    #[error("Places HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google Places API error: {status}{}", detail_suffix(.message))]
    Api {
        status: String,
        message: Option<String>,
    },

    #[error("Places JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" - {m}"))
        .unwrap_or_default()
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Looks up organizations matching `term` around `location`.
    async fn search(&self, term: &str, location: &str) -> Result<Vec<Resource>, PlacesError>;
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
}

#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    api_key: Option<String>,
    max_results: usize,
}

impl GooglePlacesClient {
    pub fn new(client: Client, api_key: Option<String>, max_results: usize) -> Self {
        Self {
            client,
            api_key,
            max_results,
        }
    }
}

#[async_trait]
impl PlaceSearch for GooglePlacesClient {
    async fn search(&self, term: &str, location: &str) -> Result<Vec<Resource>, PlacesError> {
        let api_key = self.api_key.as_deref().ok_or(PlacesError::MissingApiKey)?;
        let query = format!("{term} in {location}");

        info!(%query, "Searching Google Places");

        let body = self
            .client
            .get(TEXT_SEARCH_URL)
            .query(&[("query", query.as_str()), ("key", api_key)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_text_search(&body, self.max_results)
    }
}

/// Google reports failures in-band through `status`.
fn parse_text_search(body: &str, max_results: usize) -> Result<Vec<Resource>, PlacesError> {
    let response: TextSearchResponse = serde_json::from_str(body)?;

    match response.status.as_str() {
        "OK" | "ZERO_RESULTS" => {}
        _ => {
            warn!(status = %response.status, "Google Places returned an error status");
            return Err(PlacesError::Api {
                status: response.status,
                message: response.error_message,
            });
        }
    }

    let resources: Vec<Resource> = response
        .results
        .into_iter()
        .take(max_results)
        .map(|place| Resource {
            name: place.name,
            address: place
                .formatted_address
                .unwrap_or_else(|| "Address not listed".to_string()),
            phone: None,
            hours: place
                .opening_hours
                .and_then(|h| h.open_now)
                .map(|open| if open { "Open now" } else { "Closed now" }.to_string()),
            next_steps: Some("Call ahead to confirm services and eligibility.".to_string()),
            rating: place.rating,
        })
        .collect();

    debug!(count = resources.len(), "Places results mapped");
    Ok(resources)
}

/// One search term per matched category, in catalog order.
pub fn search_terms_for(needs: &str) -> Vec<&'static str> {
    let terms: Vec<&'static str> = matched_categories(needs)
        .iter()
        .map(|c| c.search_term())
        .collect();
    if terms.is_empty() {
        vec![FALLBACK_SEARCH_TERM]
    } else {
        terms
    }
}

/// Builds the places backend when enabled by configuration.
pub fn build_place_search(config: &Config, http: Client) -> Option<Arc<dyn PlaceSearch>> {
    if !config.places_enabled {
        return None;
    }
    Some(Arc::new(GooglePlacesClient::new(
        http,
        config.google_places_api_key.clone(),
        config.places_max_results,
    )))
}
