use std::io::{Cursor, Seek, SeekFrom};
use std::path::Path;

use byteseq_core::formats::tga::{TgaError, read_developer_area, read_footer};
use byteseq_core::{InspectError, inspect_stream, inspect_tga_file};

struct Fixture {
    bytes: Vec<u8>,
    table_end: u64,
}

fn header(image_type: u8, id: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; 18];
    data[0] = id.len() as u8;
    data[2] = image_type;
    data[12..14].copy_from_slice(&3u16.to_le_bytes());
    data[14..16].copy_from_slice(&2u16.to_le_bytes());
    data[16] = 8;
    data.extend_from_slice(id);
    data
}

/// Grayscale image with an extension area, two developer fields (tag 5
/// listed twice, the second entry winning) and a TGA 2.0 footer.
fn tga2_fixture() -> Fixture {
    let mut data = header(3, b"plate");
    data.extend_from_slice(&[0x10; 6]);

    let first = data.len() as u32;
    data.extend_from_slice(b"old");
    let second = data.len() as u32;
    data.extend_from_slice(b"new!");
    let other = data.len() as u32;
    data.extend_from_slice(&[0x00, 0xFF]);

    let extension_offset = data.len() as u32;
    let mut extension = vec![0u8; 495];
    extension[0..2].copy_from_slice(&495u16.to_le_bytes());
    extension[2..9].copy_from_slice(b"Ada L. ");
    extension[43..48].copy_from_slice(b"line1");
    extension[43 + 81 * 2..43 + 81 * 2 + 5].copy_from_slice(b"line3");
    extension[379..385].copy_from_slice(b"render");
    for (i, value) in [1u16, 30, 15].into_iter().enumerate() {
        let at = 420 + i * 2;
        extension[at..at + 2].copy_from_slice(&value.to_le_bytes());
    }
    extension[470..474].copy_from_slice(&0xFF00_00FFu32.to_le_bytes());
    extension[474..476].copy_from_slice(&4u16.to_le_bytes());
    extension[476..478].copy_from_slice(&3u16.to_le_bytes());
    extension[494] = 2;
    data.extend_from_slice(&extension);

    let directory_offset = data.len() as u64;
    let entries = [(5u16, first, 3u32), (9, other, 2), (5, second, 4)];
    data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, offset, size) in entries {
        data.extend_from_slice(&tag.to_le_bytes());
        data.extend_from_slice(&offset.to_le_bytes());
        data.extend_from_slice(&size.to_le_bytes());
    }
    let table_end = data.len() as u64;

    data.extend_from_slice(&extension_offset.to_le_bytes());
    data.extend_from_slice(&(directory_offset as u32).to_le_bytes());
    data.extend_from_slice(b"TRUEVISION-XFILE.\0");

    Fixture {
        bytes: data,
        table_end,
    }
}

#[test]
fn inspect_file_reports_all_areas() {
    let fixture = tga2_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plate.tga");
    std::fs::write(&path, &fixture.bytes).unwrap();

    let report = inspect_tga_file(&path).unwrap();
    assert_eq!(report.input.bytes, fixture.bytes.len() as u64);

    let image = report.image.as_ref().unwrap();
    assert_eq!(image.image_type_name, "grayscale");
    assert!(!image.rle);
    assert_eq!((image.width, image.height), (3, 2));
    assert_eq!(image.image_id.as_deref(), Some("plate"));

    let extension = report.extension.as_ref().unwrap();
    assert_eq!(extension.author_name.as_deref(), Some("Ada L."));
    assert_eq!(extension.comments, vec!["line1", "line3"]);
    assert_eq!(extension.job_name.as_deref(), Some("render"));
    assert_eq!(extension.job_time.as_deref(), Some("1:30:15"));
    assert_eq!(extension.timestamp, None);
    assert_eq!(extension.software_version, None);
    assert_eq!(extension.key_color, 0xFF00_00FF);
    assert!((extension.pixel_aspect_ratio.unwrap() - 4.0 / 3.0).abs() < 1e-9);
    assert_eq!(extension.gamma, None);
    assert_eq!(extension.attributes_type, 2);

    let fields: Vec<_> = report
        .developer_fields
        .iter()
        .map(|f| (f.tag, f.size, f.data_hex.as_str()))
        .collect();
    assert_eq!(fields, vec![(5, 4, "6e657721"), (9, 2, "00ff")]);
}

#[test]
fn developer_area_leaves_stream_after_table() {
    let fixture = tga2_fixture();
    let mut cursor = Cursor::new(fixture.bytes);
    let footer = read_footer(&mut cursor).unwrap().unwrap();

    let area =
        read_developer_area(&mut cursor, u64::from(footer.developer_directory_offset)).unwrap();
    assert_eq!(area.len(), 2);
    assert_eq!(area.get(5), Some(&b"new!"[..]));
    assert_eq!(cursor.stream_position().unwrap(), fixture.table_end);
}

#[test]
fn tga1_file_has_no_optional_sections() {
    let mut data = header(10, b"");
    data.extend_from_slice(&[0x81, 0x00, 0x00, 0x00]);
    let report = inspect_stream(Path::new("legacy.tga"), Cursor::new(data)).unwrap();

    let image = report.image.as_ref().unwrap();
    assert!(image.rle);
    assert_eq!(image.image_type_name, "true-color");
    assert!(report.extension.is_none());
    assert!(report.developer_fields.is_empty());

    let value = serde_json::to_value(&report).unwrap();
    assert!(value.get("extension").is_none());
}

#[test]
fn truncated_payload_names_tag() {
    let fixture = tga2_fixture();
    let mut bytes = fixture.bytes;
    // Point tag 9 past the end of the file.
    let entry = fixture.table_end as usize - 10 * 2;
    bytes[entry + 2..entry + 6].copy_from_slice(&u32::MAX.to_le_bytes());

    let err = inspect_stream(Path::new("broken.tga"), Cursor::new(bytes)).unwrap_err();
    assert!(matches!(
        err,
        InspectError::Tga(TgaError::Payload { tag: 9, .. })
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = inspect_tga_file(&dir.path().join("absent.tga")).unwrap_err();
    assert!(matches!(err, InspectError::Io(_)));
}

#[test]
fn footer_lookup_does_not_depend_on_position() {
    let fixture = tga2_fixture();
    let mut cursor = Cursor::new(fixture.bytes);
    cursor.seek(SeekFrom::Start(3)).unwrap();
    assert!(read_footer(&mut cursor).unwrap().is_some());
}
