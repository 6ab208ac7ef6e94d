pub mod ports;
pub mod product;
pub mod token;
