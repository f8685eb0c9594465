use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::flickr::error::FlickrResult;
use crate::flickr::sender::RequestSender;
use crate::flickr::table::DecodedImage;

/// Decodes downloaded bytes into a bitmap and encodes bitmaps back into a
/// canonical byte format, so the concrete image library stays swappable.
pub(crate) trait ImageCodec {
    fn decode(&self, bytes: &[u8]) -> FlickrResult<DynamicImage>;
    fn encode(&self, image: &DynamicImage) -> FlickrResult<Vec<u8>>;
}

/// [ImageCodec] backed by the `image` crate, normalizing to lossless PNG.
pub(crate) struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> FlickrResult<DynamicImage> {
        Ok(image::load_from_memory(bytes)?)
    }

    fn encode(&self, image: &DynamicImage) -> FlickrResult<Vec<u8>> {
        let mut buffer = Vec::new();
        image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
        Ok(buffer)
    }
}

/// Downloads a single remote image and decodes it.
pub(crate) struct ImageFetcher {
    request_sender: RequestSender,
    codec: Box<dyn ImageCodec>,
}

impl ImageFetcher {
    pub(crate) fn new(request_sender: RequestSender) -> Self {
        Self::with_codec(request_sender, Box::new(PngCodec))
    }

    pub(crate) fn with_codec(request_sender: RequestSender, codec: Box<dyn ImageCodec>) -> Self {
        ImageFetcher {
            request_sender,
            codec,
        }
    }

    /// Downloads `url` and returns the decoded image, re-encoded to PNG.
    ///
    /// Re-encoding normalizes whatever format the host serves into one
    /// consistent, known-decodable representation before it lands in the
    /// output table. Any non-success status aborts the whole run.
    pub(crate) fn fetch_and_decode(&self, url: &str) -> FlickrResult<DecodedImage> {
        let bytes = self.request_sender.get_bytes_from_url(url)?;
        let image = self.codec.decode(&bytes)?;
        let png = self.codec.encode(&image)?;

        trace!("Decoded {url} ({}x{})", image.width(), image.height());
        Ok(DecodedImage::new(image.width(), image.height(), png))
    }
}
