// Medstock Core - Domain logic for the medicine inventory

pub mod expiry;
pub mod label;
pub mod qr;

pub use expiry::{count_near_expiry, days_until, parse_date, ExpiryStatus, NEAR_EXPIRY_DAYS};
pub use label::{qr_file_name, sanitize_name, MedicineLabel};
pub use qr::{encode_png, LabelError};
