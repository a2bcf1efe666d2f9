pub mod accounting;
pub mod models;
pub mod ordering;
