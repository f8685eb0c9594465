use indicatif::{ProgressBar, ProgressStyle};

use crate::flickr::error::FlickrResult;
use crate::flickr::fetcher::ImageFetcher;
use crate::flickr::grabber::Grabber;
use crate::flickr::io::Config;
use crate::flickr::sender::RequestSender;
use crate::flickr::table::ImageTable;

pub(crate) mod error;
pub(crate) mod fetcher;
pub(crate) mod grabber;
pub(crate) mod io;
pub(crate) mod sender;
pub(crate) mod table;

/// A web connector that manages how the API is called (through the
/// [RequestSender]), how image URLs are grabbed, and how the grabbed URLs are
/// downloaded into the output table.
pub(crate) struct FlickrWebConnector {
    /// Progress bar that displays the current progress in downloading images.
    progress_bar: ProgressBar,
    /// Grabber which is responsible for paginating search results.
    grabber: Grabber,
    /// Fetcher which downloads and decodes a single image.
    fetcher: ImageFetcher,
}

impl FlickrWebConnector {
    /// Creates an instance of `Self` for grabbing and downloading images.
    pub(crate) fn new(request_sender: &RequestSender) -> Self {
        FlickrWebConnector {
            progress_bar: ProgressBar::hidden(),
            grabber: Grabber::new(request_sender.clone()),
            fetcher: ImageFetcher::new(request_sender.clone()),
        }
    }

    /// Runs one full execution: paginates the search, downloads every
    /// grabbed URL in order, and packages the decoded images into the
    /// output table.
    ///
    /// Each run is an isolated, stateless pass; the first fatal error aborts
    /// it and discards any partial progress.
    pub(crate) fn execute(&mut self, config: &Config) -> FlickrResult<ImageTable> {
        let urls = self
            .grabber
            .grab_search(config.search_term(), config.num_images() as usize)?;
        debug!("Retrieved {} unique image URLs from Flickr.", urls.len());

        self.download_images(&urls)
    }

    /// Downloads every URL strictly sequentially; any failure aborts and no
    /// table is emitted.
    pub(crate) fn download_images(&mut self, urls: &[String]) -> FlickrResult<ImageTable> {
        self.initialize_progress_bar(urls.len() as u64);

        let mut table = ImageTable::new();
        for url in urls {
            self.progress_bar.set_message(url.clone());
            let image = self.fetcher.fetch_and_decode(url)?;
            trace!(
                "Row {}: {}x{} ({} bytes)",
                table.len(),
                image.width(),
                image.height(),
                image.png_bytes().len()
            );
            table.push(image);
            self.progress_bar.inc(1);
        }

        self.progress_bar
            .finish_with_message("Image retrieval complete.");
        Ok(table)
    }

    /// Initializes the progress bar with a fresh instance for downloads.
    ///
    /// # Arguments
    ///
    /// * `len`: Length of the progress bar.
    fn initialize_progress_bar(&mut self, len: u64) {
        const PROGRESS_TEMPLATE: &str = "{spinner} [{bar:40}] {pos}/{len} {msg}";

        let progress_style = ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");

        self.progress_bar = ProgressBar::new(len);
        self.progress_bar.set_style(progress_style);
        self.progress_bar.set_prefix("Downloading");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flickr::error::FlickrError;

    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, RgbImage};
    use mockito::Server;

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_download_images_packages_one_row_per_url() {
        let mut server = Server::new();
        server
            .mock("GET", "/a.jpg")
            .with_status(200)
            .with_body(png_bytes())
            .create();
        server
            .mock("GET", "/b.jpg")
            .with_status(200)
            .with_body(png_bytes())
            .create();

        let sender = RequestSender::with_base_url("key", &server.url());
        let mut connector = FlickrWebConnector::new(&sender);
        let urls = vec![
            format!("{}/a.jpg", server.url()),
            format!("{}/b.jpg", server.url()),
        ];

        let table = connector.download_images(&urls).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.column_name(), "Image");
    }

    #[test]
    fn test_single_failed_download_discards_whole_table() {
        let mut server = Server::new();
        server
            .mock("GET", "/a.jpg")
            .with_status(200)
            .with_body(png_bytes())
            .create();
        server.mock("GET", "/b.jpg").with_status(404).create();

        let sender = RequestSender::with_base_url("key", &server.url());
        let mut connector = FlickrWebConnector::new(&sender);
        let urls = vec![
            format!("{}/a.jpg", server.url()),
            format!("{}/b.jpg", server.url()),
        ];

        let err = connector.download_images(&urls).unwrap_err();
        assert!(matches!(err, FlickrError::Download { status: 404, .. }));
    }

    #[test]
    fn test_download_images_with_no_urls_yields_empty_table() {
        let sender = RequestSender::with_base_url("key", "http://127.0.0.1:9");
        let mut connector = FlickrWebConnector::new(&sender);
        let table = connector.download_images(&[]).unwrap();
        assert!(table.is_empty());
    }
}
