pub mod hash;
pub mod salts;
pub mod select;
