//! Domain Concerns

pub mod carts;
