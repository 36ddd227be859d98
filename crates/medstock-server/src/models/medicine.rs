//! Medicine record model and form input.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use medstock_core::{ExpiryStatus, MedicineLabel};
use serde::Deserialize;
use sqlx::FromRow;

/// A medicine stored in the inventory.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Medicine {
    /// Row id assigned by SQLite.
    pub id: i64,
    pub name: String,
    /// Empty when not provided.
    pub manufacturer: String,
    /// Free-form date text, empty when not provided.
    pub manufacture_date: String,
    /// Expected as `YYYY-MM-DD`, but stored as entered.
    pub expiry_date: String,
    pub price: f64,
    pub additional_info: String,
    /// Path of the generated QR image on disk.
    pub qr_path: String,
    /// Time of the most recent insert or update.
    pub last_updated: DateTime<Utc>,
}

impl Medicine {
    pub fn label(&self) -> MedicineLabel<'_> {
        MedicineLabel {
            name: &self.name,
            manufacturer: &self.manufacturer,
            manufacture_date: &self.manufacture_date,
            expiry_date: &self.expiry_date,
            price: self.price,
            additional_info: &self.additional_info,
        }
    }

    pub fn expiry_status(&self, today: NaiveDate) -> ExpiryStatus {
        ExpiryStatus::of(&self.expiry_date, today)
    }

    /// Timestamp for the next write to this record.
    ///
    /// Always strictly later than the current `last_updated`, even when the
    /// clock has not moved on.
    pub fn next_update_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let floor = self.last_updated + Duration::microseconds(1);
        now.max(floor)
    }
}

/// Raw form submission from the add and update pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MedicineForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default, rename = "mdate")]
    pub manufacture_date: String,
    #[serde(default, rename = "edate")]
    pub expiry_date: String,
    #[serde(default)]
    pub price: String,
    #[serde(default, rename = "info")]
    pub additional_info: String,
}

/// Reasons a form submission is rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name and expiry date are required.")]
    MissingRequired,

    #[error("Price must be a number.")]
    InvalidPrice,
}

/// Validated field values ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMedicine {
    pub name: String,
    pub manufacturer: String,
    pub manufacture_date: String,
    pub expiry_date: String,
    pub price: f64,
    pub additional_info: String,
}

impl MedicineForm {
    /// Trims the text fields and checks the required ones.
    ///
    /// An empty price becomes 0. Additional info is kept verbatim.
    pub fn validate(self) -> Result<NewMedicine, ValidationError> {
        let name = self.name.trim().to_string();
        let expiry_date = self.expiry_date.trim().to_string();
        if name.is_empty() || expiry_date.is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        let price = match self.price.trim() {
            "" => 0.0,
            raw => raw
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or(ValidationError::InvalidPrice)?,
        };

        Ok(NewMedicine {
            name,
            manufacturer: self.manufacturer.trim().to_string(),
            manufacture_date: self.manufacture_date.trim().to_string(),
            expiry_date,
            price,
            additional_info: self.additional_info,
        })
    }
}

impl NewMedicine {
    pub fn label(&self) -> MedicineLabel<'_> {
        MedicineLabel {
            name: &self.name,
            manufacturer: &self.manufacturer,
            manufacture_date: &self.manufacture_date,
            expiry_date: &self.expiry_date,
            price: self.price,
            additional_info: &self.additional_info,
        }
    }
}
