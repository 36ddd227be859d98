// Integration test for label rendering
//
// Decodes the PNG produced for a full label and checks it is a square,
// two-tone image large enough to scan.

use chrono::NaiveDate;
use image::GenericImageView;
use medstock_core::{encode_png, MedicineLabel};

fn paracetamol() -> MedicineLabel<'static> {
    MedicineLabel {
        name: "Paracetamol",
        manufacturer: "Acme Pharma",
        manufacture_date: "2023-01-01",
        expiry_date: "2024-01-01",
        price: 2.25,
        additional_info: "500mg tablets, 16 per box",
    }
}

#[test]
fn test_label_png_is_square_black_and_white() {
    let png = encode_png(&paracetamol().text()).expect("label should encode");
    let img = image::load_from_memory(&png).expect("output should be a valid PNG");

    let (width, height) = img.dimensions();
    assert_eq!(width, height, "QR images are square");
    assert!(width >= 21 * 10, "at least a version 1 code at 10px per module");

    let gray = img.to_luma8();
    assert!(gray.pixels().any(|p| p.0[0] == 0), "has dark modules");
    assert!(gray.pixels().any(|p| p.0[0] == 255), "has light modules");
    assert!(
        gray.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255),
        "no intermediate shades"
    );
}

#[test]
fn test_longer_label_produces_larger_code() {
    let short = MedicineLabel {
        additional_info: "",
        ..paracetamol()
    };
    let long_info = "Store below 25C. ".repeat(20);
    let long = MedicineLabel {
        additional_info: &long_info,
        ..paracetamol()
    };

    let short_img = image::load_from_memory(&encode_png(&short.text()).unwrap()).unwrap();
    let long_img = image::load_from_memory(&encode_png(&long.text()).unwrap()).unwrap();
    assert!(long_img.width() > short_img.width());
}

#[test]
fn test_file_name_for_label() {
    let at = NaiveDate::from_ymd_opt(2024, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 999)
        .unwrap();
    assert_eq!(paracetamol().file_name(at), "Paracetamol_20241231235959999.png");
}
