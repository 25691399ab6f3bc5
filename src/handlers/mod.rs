mod stocks;

pub use stocks::*;
