//! Tests for format detection and the async import path

use super::*;
use crate::Error;
use crate::app::services::interchange::delimited::render_delimited;
use crate::app::services::interchange::importer::{SourceFormat, import_file};
use crate::app::services::interchange::workbook::render_workbook;
use std::path::Path;

#[test]
fn test_format_detection() {
    assert_eq!(
        SourceFormat::from_path(Path::new("records.xlsx")).unwrap(),
        SourceFormat::Workbook
    );
    assert_eq!(
        SourceFormat::from_path(Path::new("records.XLS")).unwrap(),
        SourceFormat::Workbook
    );
    assert_eq!(
        SourceFormat::from_path(Path::new("车辆费用记录_20240315.csv")).unwrap(),
        SourceFormat::Delimited
    );
}

#[test]
fn test_unsupported_extension() {
    for name in ["records.txt", "records", "records.json"] {
        let result = SourceFormat::from_path(Path::new(name));
        assert!(matches!(result, Err(Error::UnsupportedFileFormat { .. })), "{}", name);
    }
}

#[tokio::test]
async fn test_import_csv_file() {
    let document = render_delimited(&sample_charging(), &sample_parking()).unwrap();
    let (_dir, path) = write_temp_file("export.csv", document.as_bytes());

    let result = import_file(&path, today()).await.unwrap();

    assert_eq!(result.charging.len(), 3);
    assert_eq!(result.parking.len(), 2);
    assert_eq!(result.stats.charging_imported, 3);
    assert_eq!(result.stats.parking_imported, 2);
}

#[tokio::test]
async fn test_import_workbook_file() {
    let bytes = render_workbook(&sample_charging(), &sample_parking()).unwrap();
    let (_dir, path) = write_temp_file("export.xlsx", &bytes);

    let result = import_file(&path, today()).await.unwrap();

    assert_eq!(result.charging.len(), 3);
    assert_eq!(result.parking.len(), 2);
}

#[tokio::test]
async fn test_unsupported_file_is_not_read() {
    // the file does not exist; the extension check must fail first
    let result = import_file(Path::new("/nonexistent/records.txt"), today()).await;
    assert!(matches!(result, Err(Error::UnsupportedFileFormat { .. })));
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = import_file(&dir.path().join("missing.csv"), today()).await;
    assert!(matches!(result, Err(Error::FileRead { .. })));
}

#[tokio::test]
async fn test_invalid_utf8_is_tolerated() {
    let mut bytes = "停车记录\n日期,停车费用(元)\n2024-03-02,6\n".as_bytes().to_vec();
    bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
    let (_dir, path) = write_temp_file("broken.csv", &bytes);

    let result = import_file(&path, today()).await.unwrap();
    assert_eq!(result.parking.len(), 1);
}
