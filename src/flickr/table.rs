/// Name of the single output column.
pub(crate) const IMAGE_COLUMN: &str = "Image";

/// An in-memory bitmap decoded from a downloaded image, held as normalized
/// PNG bytes. Owned by the output table row it ends up in.
#[derive(Clone, Debug)]
pub(crate) struct DecodedImage {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

impl DecodedImage {
    pub(crate) fn new(width: u32, height: u32, png: Vec<u8>) -> Self {
        DecodedImage { width, height, png }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn png_bytes(&self) -> &[u8] {
        &self.png
    }
}

/// The output artifact handed back to the host: a table with a single
/// image column, one row per downloaded URL, in discovery order.
#[derive(Debug, Default)]
pub(crate) struct ImageTable {
    rows: Vec<DecodedImage>,
}

impl ImageTable {
    pub(crate) fn new() -> Self {
        ImageTable { rows: Vec::new() }
    }

    pub(crate) fn column_name(&self) -> &'static str {
        IMAGE_COLUMN
    }

    pub(crate) fn push(&mut self, image: DecodedImage) {
        self.rows.push(image);
    }

    pub(crate) fn rows(&self) -> &[DecodedImage] {
        &self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_preserve_insertion_order() {
        let mut table = ImageTable::new();
        assert!(table.is_empty());

        table.push(DecodedImage::new(1, 1, vec![0]));
        table.push(DecodedImage::new(2, 2, vec![1]));

        assert_eq!(table.len(), 2);
        assert_eq!(table.column_name(), "Image");
        assert_eq!(table.rows()[0].width(), 1);
        assert_eq!(table.rows()[1].width(), 2);
    }
}
