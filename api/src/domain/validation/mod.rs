//! Field validation helpers
//!
//! Pure checks shared by the application services. Anything that needs a
//! repository lookup lives in the services themselves.

pub mod contact;
pub mod documents;
pub mod fields;
pub mod money;

pub use contact::{format_phone, is_valid_email, is_valid_phone, is_valid_zip, only_digits_string};
pub use documents::{format_cnpj_or_cpf, is_valid_cnpj, is_valid_cpf};
pub use fields::{deserialize_present, provided, uuid_value, FieldErrors};
pub use money::{format_price, parse_price};
