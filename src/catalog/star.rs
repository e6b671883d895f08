use serde_derive::Serialize;

/// a single catalog entry, decoded from one fixed-width text record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarRecord {
    /// the star name, up to 16 visible characters, still space padded
    pub label: String,
    /// right ascension in degrees
    pub ra: f64,
    /// declination in degrees
    pub dec: f64,
    /// visual magnitude, lower means brighter
    pub magnitude: f64,
    /// spectral class, at most 2 characters, e.g. "A2"
    pub spectral_class: String,
    /// proper motion in right ascension, milliarcseconds per year
    pub proper_motion_ra: f64,
    /// proper motion in declination, milliarcseconds per year
    pub proper_motion_dec: f64,
}

/// (start column, width) of each field inside a record
const LABEL: (usize, usize) = (0, 17);
const RA: (usize, usize) = (17, 11);
const DEC: (usize, usize) = (28, 12);
const MAGNITUDE: (usize, usize) = (40, 5);
const SPECTRAL_CLASS: (usize, usize) = (45, 3);
const PROPER_MOTION_RA: (usize, usize) = (47, 9);
const PROPER_MOTION_DEC: (usize, usize) = (56, 9);

const LABEL_VISIBLE: usize = 16;
const SPECTRAL_CLASS_VISIBLE: usize = 2;

impl StarRecord {
    /// decodes one raw record as it sits in the catalog file
    /// the record is read like a text line: at most record_length - 1 bytes, stopping after a
    /// newline. Columns falling past the end of that line decode as empty text
    pub fn decode(raw: &[u8]) -> StarRecord {
        let line_len = raw.len().saturating_sub(1);
        let line = &raw[..line_len];
        let line = match line.iter().position(|&b| b == b'\n') {
            Some(newline) => &line[..=newline],
            None => line,
        };

        StarRecord {
            label: text(column(line, LABEL), LABEL_VISIBLE),
            ra: number(column(line, RA)),
            dec: number(column(line, DEC)),
            magnitude: number(column(line, MAGNITUDE)),
            spectral_class: text(column(line, SPECTRAL_CLASS), SPECTRAL_CLASS_VISIBLE),
            proper_motion_ra: number(column(line, PROPER_MOTION_RA)),
            proper_motion_dec: number(column(line, PROPER_MOTION_DEC)),
        }
    }

    /// the label with its right hand padding removed, ready to be drawn
    pub fn display_label(&self) -> &str {
        self.label.trim_end()
    }
}

/// the bytes of a column, clamped to the bytes actually present
fn column(line: &[u8], (start, width): (usize, usize)) -> &[u8] {
    let start = start.min(line.len());
    let end = (start + width).min(line.len());
    &line[start..end]
}

/// catalog text is one byte per character, so bytes are cut before they are decoded and each
/// byte maps to the Latin-1 character of the same value
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn text(bytes: &[u8], visible: usize) -> String {
    let visible = &bytes[..visible.min(bytes.len())];
    latin1(visible)
        .chars()
        .filter(|&c| c != '\n' && c != '\r')
        .collect()
}

fn number(bytes: &[u8]) -> f64 {
    parse_lenient(&latin1(bytes))
}

/// parses decimal text the forgiving way the catalog format expects: leading whitespace is
/// skipped, the longest numeric prefix is used, and text with no numeric prefix is 0.0
pub fn parse_lenient(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        let fraction_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        mantissa_digits += end - fraction_start;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // an exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end].parse::<f64>().unwrap_or(0.0)
}
