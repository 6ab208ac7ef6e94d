use crate::domain::token::Token;
use crate::error::Result;
use std::io::Write;

/// Writes tokens as CSV (`id,status,product_name,product_image,created_at`).
///
/// The `id` column is the redeem code; timestamps are RFC 3339 in UTC.
pub struct TokenWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TokenWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_tokens(&mut self, tokens: &[Token]) -> Result<()> {
        self.writer.write_record([
            "id",
            "status",
            "product_name",
            "product_image",
            "created_at",
        ])?;
        for token in tokens {
            self.writer.write_record([
                token.redeem_code().as_str(),
                token.status.as_str(),
                token.product_name.as_str(),
                token.product_image.as_str(),
                token.created_at.to_rfc3339().as_str(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
