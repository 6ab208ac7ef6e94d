use crate::domain::product::Product;
use crate::error::{FichaError, Result};
use std::io::Read;

/// Reads catalog entries from a CSV source with an `id,name,price,image` header.
///
/// Whitespace around fields is trimmed. Rows with a negative or unparseable
/// price are yielded as errors without stopping the stream.
pub struct ProductReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ProductReader<R> {
    /// Creates a new `ProductReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes products.
    pub fn products(self) -> impl Iterator<Item = Result<Product>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(FichaError::from))
    }
}
