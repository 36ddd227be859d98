//! Database models for the medicine inventory.

pub mod medicine;

pub use medicine::{Medicine, MedicineForm, NewMedicine, ValidationError};
