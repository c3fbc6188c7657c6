use crate::formats::tga::{DeveloperArea, TgaExtension, TgaHeader};
use crate::{DeveloperField, ExtensionSummary, ImageSummary};

const RLE_FLAG: u8 = 0x08;

pub(crate) fn image_type_name(image_type: u8) -> &'static str {
    match image_type & !RLE_FLAG {
        0 => "no-image",
        1 => "color-mapped",
        2 => "true-color",
        3 => "grayscale",
        _ => "unknown",
    }
}

pub(crate) fn image_summary(header: &TgaHeader) -> ImageSummary {
    ImageSummary {
        image_type: header.image_type,
        image_type_name: image_type_name(header.image_type).to_string(),
        rle: header.image_type & RLE_FLAG != 0,
        width: header.width,
        height: header.height,
        pixel_depth: header.pixel_depth,
        x_origin: header.x_origin,
        y_origin: header.y_origin,
        color_map_length: header.color_map_length,
        image_id: header.image_id.clone(),
    }
}

pub(crate) fn extension_summary(extension: TgaExtension) -> ExtensionSummary {
    ExtensionSummary {
        author_name: extension.author_name,
        comments: extension.comments,
        timestamp: extension.timestamp,
        job_name: extension.job_name,
        job_time: extension.job_time,
        software_id: extension.software_id,
        software_version: extension.software_version,
        key_color: extension.key_color,
        pixel_aspect_ratio: extension.pixel_aspect_ratio,
        gamma: extension.gamma,
        attributes_type: extension.attributes_type,
    }
}

pub(crate) fn developer_fields(area: &DeveloperArea) -> Vec<DeveloperField> {
    area.iter()
        .map(|(tag, bytes)| DeveloperField {
            tag,
            size: bytes.len() as u64,
            data_hex: hex::encode(bytes),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{image_summary, image_type_name};
    use crate::formats::tga::TgaHeader;

    #[test]
    fn rle_types_share_names() {
        assert_eq!(image_type_name(2), "true-color");
        assert_eq!(image_type_name(10), "true-color");
        assert_eq!(image_type_name(11), "grayscale");
        assert_eq!(image_type_name(0x20), "unknown");
    }

    #[test]
    fn summary_flags_rle() {
        let header = TgaHeader {
            id_length: 0,
            color_map_type: 1,
            image_type: 9,
            color_map_origin: 0,
            color_map_length: 256,
            color_map_depth: 24,
            x_origin: 0,
            y_origin: 0,
            width: 4,
            height: 2,
            pixel_depth: 8,
            descriptor: 0,
            image_id: None,
        };
        let summary = image_summary(&header);
        assert!(summary.rle);
        assert_eq!(summary.image_type_name, "color-mapped");
        assert_eq!(summary.color_map_length, 256);
    }
}
