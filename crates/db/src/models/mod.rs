//! Row models, domain records and request DTOs.
//!
//! Row structs mirror storage columns, keeping nullable columns as `Option`.
//! They are converted once into the plain domain records by
//! [`crate::mapper::RowMapper`].

pub mod category;
pub mod quote;
