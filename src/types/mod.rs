mod errors;
mod money;

pub use money::Money;

pub type Sku = String;
pub type Quantity = i64;
