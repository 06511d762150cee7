//! Embedded JPEG quality estimation.
//!
//! JPEG files do not record the encoder quality setting directly; it is
//! recovered from the luminance quantization table in the DQT segment.
//! Encoders in the libjpeg family (libjpeg, the `image` crate, ImageSharp)
//! derive their tables by scaling the IJG Annex K reference table, so
//! matching the observed table back against all 100 scaled candidates
//! recovers the original setting. Encoders with custom tables get an
//! approximate estimate, which only shifts the skip/recompress boundary.

const SOI: [u8; 2] = [0xFF, 0xD8];
const MARKER_DQT: u8 = 0xDB;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;

/// IJG Annex K luminance quantization table.
const STD_LUMINANCE_TABLE: [u16; 64] = [
    16, 11, 10, 16, 24, 40, 51, 61, //
    12, 12, 14, 19, 26, 58, 60, 55, //
    14, 13, 16, 24, 40, 57, 69, 56, //
    14, 17, 22, 29, 51, 87, 80, 62, //
    18, 22, 37, 56, 68, 109, 103, 77, //
    24, 35, 55, 64, 81, 104, 113, 92, //
    49, 64, 78, 87, 103, 121, 120, 101, //
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// Estimate the quality setting a JPEG stream was encoded with.
///
/// Returns `None` when the data is not a JPEG or carries no luminance
/// quantization table before the scan data. Comparison uses coefficient
/// sums, which makes the zigzag storage order of the DQT irrelevant.
/// Ties between candidate qualities resolve toward the higher value, so
/// an ambiguous table errs toward recompression.
pub fn estimate_quality(data: &[u8]) -> Option<u8> {
    let table = luminance_table(data)?;
    let observed: u32 = table.iter().map(|&v| u32::from(v)).sum();

    let mut best_quality = 1u8;
    let mut best_distance = u32::MAX;
    for quality in 1..=100u8 {
        let candidate: u32 = scaled_table(quality).iter().map(|&v| u32::from(v)).sum();
        let distance = candidate.abs_diff(observed);
        if distance <= best_distance {
            best_distance = distance;
            best_quality = quality;
        }
    }

    Some(best_quality)
}

/// Scale the reference table with the libjpeg quality formula.
fn scaled_table(quality: u8) -> [u16; 64] {
    let quality = u32::from(quality.clamp(1, 100));
    let scale = if quality < 50 {
        5000 / quality
    } else {
        200 - quality * 2
    };

    let mut table = [0u16; 64];
    for (out, &v) in table.iter_mut().zip(STD_LUMINANCE_TABLE.iter()) {
        *out = ((u32::from(v) * scale + 50) / 100).clamp(1, 255) as u16;
    }
    table
}

/// Extract the first luminance (id 0) quantization table from the
/// segment stream. Handles 8- and 16-bit table precision and multiple
/// tables per DQT segment.
fn luminance_table(data: &[u8]) -> Option<[u16; 64]> {
    if !data.starts_with(&SOI) {
        return None;
    }

    let mut pos = 2;
    while pos + 4 <= data.len() {
        if data[pos] != 0xFF {
            // Lost segment synchronization, give up.
            return None;
        }
        let marker = data[pos + 1];

        // Fill bytes before a marker.
        if marker == 0xFF {
            pos += 1;
            continue;
        }

        // Standalone markers carry no length field.
        if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
            pos += 2;
            continue;
        }

        // Entropy-coded data follows SOS; a DQT can no longer appear.
        if marker == MARKER_SOS || marker == MARKER_EOI {
            return None;
        }

        let length = u16::from_be_bytes([data[pos + 2], data[pos + 3]]) as usize;
        if length < 2 || pos + 2 + length > data.len() {
            return None;
        }

        if marker == MARKER_DQT {
            if let Some(table) = luminance_table_in_segment(&data[pos + 4..pos + 2 + length]) {
                return Some(table);
            }
        }

        pos += 2 + length;
    }

    None
}

fn luminance_table_in_segment(mut payload: &[u8]) -> Option<[u16; 64]> {
    while !payload.is_empty() {
        let precision = payload[0] >> 4;
        let table_id = payload[0] & 0x0F;
        let entry_bytes = if precision == 1 { 128 } else { 64 };
        if payload.len() < 1 + entry_bytes {
            return None;
        }

        if table_id == 0 {
            let mut table = [0u16; 64];
            for (i, slot) in table.iter_mut().enumerate() {
                *slot = if precision == 1 {
                    u16::from_be_bytes([payload[1 + 2 * i], payload[2 + 2 * i]])
                } else {
                    u16::from(payload[1 + i])
                };
            }
            return Some(table);
        }

        payload = &payload[1 + entry_bytes..];
    }
    None
}
