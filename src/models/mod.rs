pub mod enums;
pub mod patient;

pub use enums::*;
pub use patient::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field} value: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Patient name must not be empty")]
    EmptyName,

    #[error("Patient age must be greater than zero")]
    InvalidAge,

    #[error("Patient weight must be a positive number of kilograms")]
    InvalidWeight,

    #[error("Patient height must be greater than zero")]
    InvalidHeight,
}
