use time::{Date, Month, PrimitiveDateTime, Time, macros::format_description};

use crate::decode::{Charset, SequentialReader};
use crate::source::{ByteSource, ReadError};

use super::layout;

/// One entry of the developer tag table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeveloperTag {
    pub tag: u16,
    pub offset: u32,
    pub size: u32,
}

/// Sequential reader with the TGA conventions applied: little-endian values,
/// NUL-padded fixed-width ASCII fields, zero meaning "not set".
pub struct TgaReader<S> {
    inner: SequentialReader<S>,
}

impl<S: ByteSource> TgaReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            inner: SequentialReader::with_byte_order(source, layout::BYTE_ORDER),
        }
    }

    pub fn values(&mut self) -> &mut SequentialReader<S> {
        &mut self.inner
    }

    /// Read a `width`-byte text field and consume its padding.
    ///
    /// Returns `None` for an empty or blank field.
    pub fn read_fixed_text(&mut self, width: usize) -> Result<Option<String>, ReadError> {
        let bytes = self.inner.read_null_terminated_bytes(width)?;
        let consumed = if bytes.len() < width {
            bytes.len() + 1
        } else {
            width
        };
        self.inner.skip((width - consumed) as u64)?;
        let text = Charset::Ascii.decode(&bytes);
        let trimmed = text.trim_end();
        Ok(if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        })
    }

    pub fn read_u16_array<const N: usize>(&mut self) -> Result<[u16; N], ReadError> {
        let mut values = [0u16; N];
        for value in &mut values {
            *value = self.inner.read_u16()?;
        }
        Ok(values)
    }

    /// Numerator/denominator pair; a zero denominator means "not specified".
    pub fn read_ratio(&mut self) -> Result<Option<f64>, ReadError> {
        let [numerator, denominator] = self.read_u16_array::<2>()?;
        Ok(ratio(numerator, denominator))
    }

    pub fn read_tag_table(&mut self) -> Result<Vec<DeveloperTag>, ReadError> {
        let count = self.inner.read_u16()?;
        // Count comes from the file; grow as entries actually decode.
        let mut tags = Vec::new();
        for _ in 0..count {
            tags.push(DeveloperTag {
                tag: self.inner.read_u16()?,
                offset: self.inner.read_u32()?,
                size: self.inner.read_u32()?,
            });
        }
        Ok(tags)
    }
}

pub fn ratio(numerator: u16, denominator: u16) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(f64::from(numerator) / f64::from(denominator))
    }
}

/// Render month/day/year/hour/minute/second as ISO 8601, or `None` when the
/// stamp is unset (all zero) or not a real calendar date.
pub fn format_timestamp(fields: [u16; 6]) -> Option<String> {
    if fields.iter().all(|&v| v == 0) {
        return None;
    }
    let [month, day, year, hour, minute, second] = fields;
    let month = Month::try_from(u8::try_from(month).ok()?).ok()?;
    let date = Date::from_calendar_date(i32::from(year), month, u8::try_from(day).ok()?).ok()?;
    let time = Time::from_hms(
        u8::try_from(hour).ok()?,
        u8::try_from(minute).ok()?,
        u8::try_from(second).ok()?,
    )
    .ok()?;
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    PrimitiveDateTime::new(date, time).format(&format).ok()
}

/// Elapsed job time as `H:MM:SS`; `None` when unset.
pub fn format_job_time(fields: [u16; 3]) -> Option<String> {
    let [hours, minutes, seconds] = fields;
    if hours == 0 && minutes == 0 && seconds == 0 {
        return None;
    }
    Some(format!("{hours}:{minutes:02}:{seconds:02}"))
}

/// Software version stored as `version * 100` plus a letter, e.g. `4.10b`.
pub fn format_software_version(number: u16, letter: u8) -> Option<String> {
    if number == 0 {
        return None;
    }
    let mut version = format!("{}.{:02}", number / 100, number % 100);
    if letter.is_ascii_alphanumeric() {
        version.push(char::from(letter));
    }
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::{
        DeveloperTag, TgaReader, format_job_time, format_software_version, format_timestamp,
        ratio,
    };
    use crate::source::SliceSource;

    #[test]
    fn fixed_text_consumes_whole_field() {
        let mut field = vec![0u8; 8];
        field[..3].copy_from_slice(b"Ann");
        field.push(0x7A);
        let mut reader = TgaReader::new(SliceSource::new(&field));
        assert_eq!(reader.read_fixed_text(8).unwrap(), Some("Ann".to_string()));
        assert_eq!(reader.values().read_u8().unwrap(), 0x7A);
    }

    #[test]
    fn fixed_text_without_terminator_uses_full_width() {
        let mut reader = TgaReader::new(SliceSource::new(b"ABCDx"));
        assert_eq!(reader.read_fixed_text(4).unwrap(), Some("ABCD".to_string()));
        assert_eq!(reader.values().read_u8().unwrap(), b'x');
    }

    #[test]
    fn blank_fixed_text_is_none() {
        let mut reader = TgaReader::new(SliceSource::new(b"   \0"));
        assert_eq!(reader.read_fixed_text(4).unwrap(), None);
    }

    #[test]
    fn tag_table_is_little_endian() {
        let data = [
            0x02, 0x00, // count
            0x01, 0x00, 0x20, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, //
            0x00, 0x80, 0x30, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut reader = TgaReader::new(SliceSource::new(&data));
        let tags = reader.read_tag_table().unwrap();
        assert_eq!(
            tags,
            vec![
                DeveloperTag {
                    tag: 1,
                    offset: 0x20,
                    size: 4
                },
                DeveloperTag {
                    tag: 0x8000,
                    offset: 0x130,
                    size: 0
                },
            ]
        );
    }

    #[test]
    fn truncated_tag_table_fails() {
        let data = [0x02, 0x00, 0x01, 0x00];
        let mut reader = TgaReader::new(SliceSource::new(&data));
        assert!(reader.read_tag_table().unwrap_err().is_end_of_sequence());
    }

    #[test]
    fn timestamp_formats_and_rejects() {
        assert_eq!(
            format_timestamp([3, 14, 2021, 9, 5, 7]),
            Some("2021-03-14T09:05:07".to_string())
        );
        assert_eq!(format_timestamp([0; 6]), None);
        assert_eq!(format_timestamp([13, 1, 2021, 0, 0, 0]), None);
        assert_eq!(format_timestamp([2, 30, 2021, 0, 0, 0]), None);
    }

    #[test]
    fn job_time_and_version() {
        assert_eq!(format_job_time([0, 0, 0]), None);
        assert_eq!(format_job_time([26, 3, 9]), Some("26:03:09".to_string()));
        assert_eq!(format_software_version(410, b'b'), Some("4.10b".to_string()));
        assert_eq!(format_software_version(200, b' '), Some("2.00".to_string()));
        assert_eq!(format_software_version(0, b'a'), None);
    }

    #[test]
    fn ratio_ignores_zero_denominator() {
        assert_eq!(ratio(1, 0), None);
        assert_eq!(ratio(3, 2), Some(1.5));
    }
}
