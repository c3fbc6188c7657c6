use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::formats::tga::{
    TgaError, parse_header, read_developer_area, read_extension_area, read_footer,
};
use crate::source::StreamSource;
use crate::{Report, make_stub_report};

mod summary;

use summary::{developer_fields, extension_summary, image_summary};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TGA error: {0}")]
    Tga(#[from] TgaError),
}

pub fn inspect_tga_file(path: &Path) -> Result<Report, InspectError> {
    let file = File::open(path)?;
    inspect_stream(path, file)
}

pub fn inspect_stream<R: Read + Seek>(path: &Path, mut stream: R) -> Result<Report, InspectError> {
    let bytes = stream.seek(SeekFrom::End(0))?;
    stream.seek(SeekFrom::Start(0))?;

    let header = parse_header(StreamSource::new(&mut stream))?;
    let mut report = make_stub_report(&path.display().to_string(), bytes);
    report.image = Some(image_summary(&header));

    let Some(footer) = read_footer(&mut stream)? else {
        debug!(path = %path.display(), "no footer, TGA 1.0 layout");
        return Ok(report);
    };

    if footer.extension_offset != 0 {
        let extension = read_extension_area(&mut stream, u64::from(footer.extension_offset))?;
        report.extension = Some(extension_summary(extension));
    }
    if footer.developer_directory_offset != 0 {
        let area =
            read_developer_area(&mut stream, u64::from(footer.developer_directory_offset))?;
        report.developer_fields = developer_fields(&area);
    }

    Ok(report)
}
