use crate::domain::product::Product;
use crate::error::Result;
use std::io::Write;

/// Writes the catalog as CSV (`id,name,price,image`), prices with two decimals.
pub struct ProductWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ProductWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_products(&mut self, products: &[Product]) -> Result<()> {
        self.writer.write_record(["id", "name", "price", "image"])?;
        for product in products {
            self.writer.write_record([
                product.id.as_str(),
                product.name.as_str(),
                product.price.to_string().as_str(),
                product.image.as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
