//! Domain models for the conversion service.

pub mod conversion;
pub mod currency;

pub use conversion::{
    ConversionId, ConversionRecord, DepartmentId, NewConversion, converted_amount,
};
pub use currency::CurrencyCode;
