//! CSV adapters for the command-line surface: catalog import and tabular output.

pub mod product_reader;
pub mod product_writer;
pub mod token_writer;
