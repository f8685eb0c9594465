use std::collections::HashSet;

use crate::flickr::error::FlickrResult;
use crate::flickr::sender::RequestSender;

/// Flickr's hard per-page limit for search requests.
const PER_PAGE_LIMIT: usize = 500;

/// Walks successive pages of the search API until enough unique image URLs
/// are gathered.
pub(crate) struct Grabber {
    request_sender: RequestSender,
}

impl Grabber {
    pub(crate) fn new(request_sender: RequestSender) -> Self {
        Grabber { request_sender }
    }

    /// Collects up to `target_count` unique image URLs for `search_term`, in
    /// discovery order.
    ///
    /// Pages are requested sequentially with `per_page` capped at the lower
    /// of the remaining need and [PER_PAGE_LIMIT]. Records with missing or
    /// sentinel metadata are logged and skipped; an empty page means the
    /// remote source is exhausted and ends the loop early with however many
    /// URLs were found. Duplicate records (identical farm/server/id/secret)
    /// collapse to a single URL.
    pub(crate) fn grab_search(
        &self,
        search_term: &str,
        target_count: usize,
    ) -> FlickrResult<Vec<String>> {
        let mut urls: Vec<String> = Vec::with_capacity(target_count.min(PER_PAGE_LIMIT));
        let mut seen: HashSet<String> = HashSet::new();
        let mut invalid_photos: usize = 0;
        let mut page: u32 = 1;

        'pages: while urls.len() < target_count {
            let per_page = (target_count - urls.len()).min(PER_PAGE_LIMIT);
            let photos = self.request_sender.search_page(search_term, per_page, page)?;

            if photos.is_empty() {
                info!("No more images available. Stopping early.");
                break;
            }

            for photo in &photos {
                let url = match photo.image_url() {
                    Some(url) => url,
                    None => {
                        trace!("Skipping invalid photo: {photo:?}");
                        invalid_photos += 1;
                        continue;
                    }
                };

                if seen.insert(url.clone()) {
                    urls.push(url);
                }

                if urls.len() == target_count {
                    break 'pages;
                }
            }

            page += 1;
        }

        if invalid_photos > 0 {
            info!("Filtered {} invalid photos from search...", invalid_photos);
        }

        info!(
            "{} grabbed! ({} unique image URLs)",
            console::style(format!("\"{search_term}\"")).color256(39).italic(),
            urls.len()
        );

        Ok(urls)
    }
}
