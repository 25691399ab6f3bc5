mod stock;
mod transaction;

pub use stock::*;
pub use transaction::*;
