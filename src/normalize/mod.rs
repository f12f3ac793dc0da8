//! Pure normalizers shared by the extractors and the shopping list.

pub mod duration;
pub mod key;
pub mod quantity;

pub use duration::parse_duration;
pub use key::normalize_key;
pub use quantity::extract_qty;
