pub mod code;
pub mod dict;
pub mod formula;

pub use code::normalize_code;
pub use dict::{DictEntry, DictError, DictItem, Dictionary, Word};
pub use formula::Formula;
