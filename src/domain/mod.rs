pub mod basket;
pub mod discount;
pub mod errors;
pub mod ports;
