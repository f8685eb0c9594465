pub(crate) mod entries;

use reqwest::blocking::Client;

use crate::flickr::error::{FlickrError, FlickrResult};
use crate::flickr::sender::entries::{PhotoEntry, SearchResponse};

/// Endpoint of the Flickr REST API.
const BASE_URL: &str = "https://www.flickr.com/services/rest/";

/// The search method invoked on the REST endpoint.
const SEARCH_METHOD: &str = "flickr.photos.search";

/// A sender that handles all calls to the Flickr API and the static image
/// hosts.
///
/// Cloning is cheap; the underlying [Client] shares its connection pool
/// between clones.
#[derive(Clone)]
pub(crate) struct RequestSender {
    /// The client used for all requests, blocking since the whole workflow
    /// is strictly sequential.
    client: Client,
    /// Base URL of the REST endpoint, swappable for tests.
    base_url: String,
    /// API key sent with every search request.
    api_key: String,
}

impl RequestSender {
    pub(crate) fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub(crate) fn with_base_url(api_key: &str, base_url: &str) -> Self {
        RequestSender {
            client: Client::builder()
                .user_agent(format!(
                    "{}/{}",
                    env!("CARGO_PKG_NAME"),
                    env!("CARGO_PKG_VERSION")
                ))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Fetches one page of search results for `text`.
    ///
    /// Fails with [FlickrError::Api] on any non-success status and with
    /// [FlickrError::MalformedResponse] when the body parses but lacks the
    /// expected `photos.photo` structure.
    pub(crate) fn search_page(
        &self,
        text: &str,
        per_page: usize,
        page: u32,
    ) -> FlickrResult<Vec<PhotoEntry>> {
        trace!("Requesting search page {page} with per_page {per_page}...");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("method", SEARCH_METHOD),
                ("api_key", &self.api_key),
                ("text", text),
                ("per_page", &per_page.to_string()),
                ("page", &page.to_string()),
                ("format", "json"),
                ("nojsoncallback", "1"),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlickrError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        let search: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| FlickrError::MalformedResponse(e.to_string()))?;
        search
            .photos
            .and_then(|photos| photos.photo)
            .ok_or_else(|| {
                FlickrError::MalformedResponse("missing `photos.photo` structure".to_string())
            })
    }

    /// Downloads the raw bytes behind `url`.
    ///
    /// Fails with [FlickrError::Download] on any non-success status; there is
    /// no retry and no per-image tolerance.
    pub(crate) fn get_bytes_from_url(&self, url: &str) -> FlickrResult<Vec<u8>> {
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FlickrError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
