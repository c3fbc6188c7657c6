use std::collections::BTreeMap;
use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use crate::decode::{Charset, RandomAccessReader};
use crate::source::{ByteSource, ReadError, SeekSource, StreamSource};

use super::error::TgaError;
use super::layout;
use super::reader::{
    DeveloperTag, TgaReader, format_job_time, format_software_version, format_timestamp,
};

/// Fixed 18-byte image header plus the image id that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_depth: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub descriptor: u8,
    pub image_id: Option<String>,
}

/// Offsets found in a TGA 2.0 footer; zero means the area is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaFooter {
    pub extension_offset: u32,
    pub developer_directory_offset: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TgaExtension {
    pub author_name: Option<String>,
    pub comments: Vec<String>,
    pub timestamp: Option<String>,
    pub job_name: Option<String>,
    pub job_time: Option<String>,
    pub software_id: Option<String>,
    pub software_version: Option<String>,
    pub key_color: u32,
    pub pixel_aspect_ratio: Option<f64>,
    pub gamma: Option<f64>,
    pub color_correction_offset: u32,
    pub postage_stamp_offset: u32,
    pub scan_line_offset: u32,
    pub attributes_type: u8,
}

/// Developer-area payloads keyed by tag; a repeated tag keeps the last payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeveloperArea {
    fields: BTreeMap<u16, Vec<u8>>,
}

impl DeveloperArea {
    pub fn get(&self, tag: u16) -> Option<&[u8]> {
        self.fields.get(&tag).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Tags in ascending order with their payloads.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &[u8])> {
        self.fields.iter().map(|(tag, bytes)| (*tag, bytes.as_slice()))
    }

    fn insert(&mut self, tag: u16, bytes: Vec<u8>) {
        self.fields.insert(tag, bytes);
    }
}

/// Parse the image header from the start of `source`.
pub fn parse_header<S: ByteSource>(source: S) -> Result<TgaHeader, TgaError> {
    let mut reader = TgaReader::new(source);
    let values = reader.values();

    let id_length = values.read_u8()?;
    let color_map_type = values.read_u8()?;
    if !layout::COLOR_MAP_TYPES.contains(&color_map_type) {
        return Err(TgaError::InvalidColorMapType {
            value: color_map_type,
        });
    }
    let image_type = values.read_u8()?;
    if !layout::IMAGE_TYPES.contains(&image_type) {
        return Err(TgaError::UnsupportedImageType { value: image_type });
    }

    let color_map_origin = values.read_u16()?;
    let color_map_length = values.read_u16()?;
    let color_map_depth = values.read_u8()?;
    let x_origin = values.read_u16()?;
    let y_origin = values.read_u16()?;
    let width = values.read_u16()?;
    let height = values.read_u16()?;
    let pixel_depth = values.read_u8()?;
    let descriptor = values.read_u8()?;

    let image_id = if id_length == 0 {
        None
    } else {
        let text = values.read_string_with(usize::from(id_length), Charset::Ascii)?;
        let trimmed = text.trim_end_matches('\0').trim_end();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    Ok(TgaHeader {
        id_length,
        color_map_type,
        image_type,
        color_map_origin,
        color_map_length,
        color_map_depth,
        x_origin,
        y_origin,
        width,
        height,
        pixel_depth,
        descriptor,
        image_id,
    })
}

/// Read the footer at the end of `stream`.
///
/// Returns `Ok(None)` when the stream is too short or lacks the TGA 2.0
/// signature (a TGA 1.0 file). Leaves the stream at its end.
pub fn read_footer<R: Read + Seek>(stream: &mut R) -> Result<Option<TgaFooter>, TgaError> {
    let len = stream.seek(SeekFrom::End(0))?;
    if len < layout::FOOTER_SIZE {
        return Ok(None);
    }
    stream.seek(SeekFrom::Start(len - layout::FOOTER_SIZE))?;

    let mut reader = TgaReader::new(StreamSource::new(&mut *stream));
    let values = reader.values();
    let extension_offset = values.read_u32()?;
    let developer_directory_offset = values.read_u32()?;
    let signature = values.read_bytes(layout::FOOTER_SIGNATURE.len())?;
    if signature != layout::FOOTER_SIGNATURE {
        debug!("no TGA 2.0 footer signature");
        return Ok(None);
    }

    Ok(Some(TgaFooter {
        extension_offset,
        developer_directory_offset,
    }))
}

/// Read the extension area that starts at `offset`.
pub fn read_extension_area<R: Read + Seek>(
    stream: &mut R,
    offset: u64,
) -> Result<TgaExtension, TgaError> {
    stream.seek(SeekFrom::Start(offset))?;
    let mut reader = TgaReader::new(StreamSource::new(&mut *stream));

    let size = reader.values().read_u16()?;
    if size < layout::EXTENSION_AREA_SIZE {
        return Err(TgaError::InvalidExtensionSize { size });
    }

    let author_name = reader.read_fixed_text(layout::AUTHOR_NAME_LEN)?;
    let mut comments = Vec::new();
    for _ in 0..layout::COMMENT_LINES {
        if let Some(line) = reader.read_fixed_text(layout::COMMENT_LINE_LEN)? {
            comments.push(line);
        }
    }
    let timestamp = format_timestamp(reader.read_u16_array::<6>()?);
    let job_name = reader.read_fixed_text(layout::JOB_NAME_LEN)?;
    let job_time = format_job_time(reader.read_u16_array::<3>()?);
    let software_id = reader.read_fixed_text(layout::SOFTWARE_ID_LEN)?;
    let version_number = reader.values().read_u16()?;
    let version_letter = reader.values().read_u8()?;
    let key_color = reader.values().read_u32()?;
    let pixel_aspect_ratio = reader.read_ratio()?;
    let gamma = reader.read_ratio()?;
    let color_correction_offset = reader.values().read_u32()?;
    let postage_stamp_offset = reader.values().read_u32()?;
    let scan_line_offset = reader.values().read_u32()?;
    let attributes_type = reader.values().read_u8()?;

    Ok(TgaExtension {
        author_name,
        comments,
        timestamp,
        job_name,
        job_time,
        software_id,
        software_version: format_software_version(version_number, version_letter),
        key_color,
        pixel_aspect_ratio,
        gamma,
        color_correction_offset,
        postage_stamp_offset,
        scan_line_offset,
        attributes_type,
    })
}

/// Read the developer area whose tag table starts at `offset`.
///
/// The tag table is parsed sequentially from `offset`; each payload is then
/// fetched by absolute offset through a random-access reader over the same
/// stream. On success the stream is left immediately after the tag table.
pub fn read_developer_area<R: Read + Seek>(
    stream: &mut R,
    offset: u64,
) -> Result<DeveloperArea, TgaError> {
    stream.seek(SeekFrom::Start(offset))?;
    let tags = TgaReader::new(StreamSource::new(&mut *stream)).read_tag_table()?;
    let table_end = offset + layout::TAG_COUNT_SIZE + layout::TAG_ENTRY_SIZE * tags.len() as u64;
    debug!(offset, table_end, tags = tags.len(), "read TGA developer tag table");

    let mut area = DeveloperArea::default();
    {
        let mut payloads =
            RandomAccessReader::with_byte_order(SeekSource::new(&mut *stream), layout::BYTE_ORDER);
        for entry in &tags {
            let bytes = fetch_payload(&mut payloads, entry).map_err(|source| TgaError::Payload {
                tag: entry.tag,
                source,
            })?;
            debug!(tag = entry.tag, size = entry.size, "fetched developer payload");
            area.insert(entry.tag, bytes);
        }
    }

    stream.seek(SeekFrom::Start(table_end))?;
    Ok(area)
}

fn fetch_payload<R: Read + Seek>(
    payloads: &mut RandomAccessReader<SeekSource<&mut R>>,
    entry: &DeveloperTag,
) -> Result<Vec<u8>, ReadError> {
    let offset = u64::from(entry.offset);
    let size = u64::from(entry.size);
    // Reject before allocating: sizes come straight from the file.
    if !payloads.is_valid_index(offset, size)? {
        return Err(ReadError::EndOfSequence);
    }
    payloads.get_bytes(offset, entry.size as usize)
}
