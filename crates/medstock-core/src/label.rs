// Human-readable label text and file naming for QR images

use chrono::NaiveDateTime;
use std::fmt;

/// Maximum number of characters of the medicine name kept in a file name.
pub const MAX_NAME_CHARS: usize = 40;

const FALLBACK_NAME: &str = "medicine";

/// The fields of a medicine record that get encoded into its QR image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MedicineLabel<'a> {
    pub name: &'a str,
    pub manufacturer: &'a str,
    pub manufacture_date: &'a str,
    pub expiry_date: &'a str,
    pub price: f64,
    pub additional_info: &'a str,
}

impl MedicineLabel<'_> {
    /// Renders the text block embedded in the QR code.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// File name for this label's image generated at `at`.
    pub fn file_name(&self, at: NaiveDateTime) -> String {
        qr_file_name(self.name, at)
    }
}

impl fmt::Display for MedicineLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Manufacturer: {}", self.manufacturer)?;
        writeln!(f, "Manufacture Date: {}", self.manufacture_date)?;
        writeln!(f, "Expiry Date: {}", self.expiry_date)?;
        writeln!(f, "Price: {}", self.price)?;
        writeln!(f, "Additional Info: {}", self.additional_info)
    }
}

/// Reduces a medicine name to a safe file name stem.
///
/// Anything outside `[A-Za-z0-9_-]` becomes `_`, and the result is cut to
/// [`MAX_NAME_CHARS`] characters.
pub fn sanitize_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .take(MAX_NAME_CHARS)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        stem
    }
}

/// Builds `<sanitized name>_<YYYYmmddHHMMSSmmm>.png`.
pub fn qr_file_name(name: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.png", sanitize_name(name), at.format("%Y%m%d%H%M%S%3f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> MedicineLabel<'static> {
        MedicineLabel {
            name: "Aspirin",
            manufacturer: "Bayer",
            manufacture_date: "2024-01-01",
            expiry_date: "2026-01-01",
            price: 4.5,
            additional_info: "Take with water",
        }
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_milli_opt(9, 5, 3, 42)
            .unwrap()
    }

    #[test]
    fn test_label_text_layout() {
        assert_eq!(
            sample().text(),
            "\nName: Aspirin\nManufacturer: Bayer\nManufacture Date: 2024-01-01\n\
             Expiry Date: 2026-01-01\nPrice: 4.5\nAdditional Info: Take with water\n"
        );
    }

    #[test]
    fn test_label_text_zero_price_and_blanks() {
        let label = MedicineLabel {
            manufacturer: "",
            price: 0.0,
            additional_info: "",
            ..sample()
        };
        let text = label.text();
        assert!(text.contains("\nManufacturer: \n"));
        assert!(text.contains("\nPrice: 0\n"));
        assert!(text.ends_with("Additional Info: \n"));
    }

    #[test]
    fn test_sanitize_replaces_spaces_and_separators() {
        assert_eq!(sanitize_name("Vitamin C 500mg"), "Vitamin_C_500mg");
        assert_eq!(sanitize_name("../etc/passwd"), "___etc_passwd");
        assert_eq!(sanitize_name("co-amoxiclav_625"), "co-amoxiclav_625");
    }

    #[test]
    fn test_sanitize_truncates() {
        let long = "x".repeat(100);
        assert_eq!(sanitize_name(&long).chars().count(), MAX_NAME_CHARS);
    }

    #[test]
    fn test_sanitize_fallback_for_empty() {
        assert_eq!(sanitize_name("   "), "medicine");
    }

    #[test]
    fn test_file_name_includes_timestamp() {
        assert_eq!(
            qr_file_name("Cough Syrup", at()),
            "Cough_Syrup_20250307090503042.png"
        );
        assert_eq!(sample().file_name(at()), "Aspirin_20250307090503042.png");
    }
}
