use serde::Deserialize;

/// Top-level shape of a `flickr.photos.search` response.
///
/// Every level is optional so that a structurally wrong body can be told
/// apart from a merely empty one.
#[derive(Deserialize, Debug)]
pub(crate) struct SearchResponse {
    pub(crate) photos: Option<PhotosEntry>,
}

/// The `photos` object wrapping one page of search results.
#[derive(Deserialize, Debug)]
pub(crate) struct PhotosEntry {
    pub(crate) photo: Option<Vec<PhotoEntry>>,
}

/// One photo record from a search page.
///
/// The API mixes presence: any of these fields can be missing, and `farm`
/// uses `0` as a sentinel for "no farm assigned". A record is only usable
/// for building a static image URL when all four fields carry real values.
#[derive(Deserialize, Debug, Clone, Default)]
pub(crate) struct PhotoEntry {
    #[serde(default)]
    pub(crate) farm: Option<u64>,
    #[serde(default)]
    pub(crate) server: Option<String>,
    #[serde(default)]
    pub(crate) id: Option<String>,
    #[serde(default)]
    pub(crate) secret: Option<String>,
}

impl PhotoEntry {
    /// Whether the record has everything needed to derive an image URL.
    pub(crate) fn is_valid(&self) -> bool {
        matches!(self.farm, Some(farm) if farm != 0)
            && Self::has_value(&self.server)
            && Self::has_value(&self.id)
            && Self::has_value(&self.secret)
    }

    /// Derives the direct static-image URL, or [None] for an invalid record.
    ///
    /// Records with identical (farm, server, id, secret) tuples derive the
    /// same URL, which is what the paginator deduplicates on.
    pub(crate) fn image_url(&self) -> Option<String> {
        if !self.is_valid() {
            return None;
        }

        Some(format!(
            "https://farm{}.staticflickr.com/{}/{}_{}.jpg",
            self.farm.unwrap(),
            self.server.as_deref().unwrap(),
            self.id.as_deref().unwrap(),
            self.secret.as_deref().unwrap(),
        ))
    }

    fn has_value(field: &Option<String>) -> bool {
        field.as_deref().is_some_and(|value| !value.is_empty())
    }
}
