pub mod coverage;
pub mod domain;
pub mod error;
