pub mod fuzzy;
pub mod phone;
