use crate::types::{ExecutableImage, JumpTable};
use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

/// A known jump table found in a file
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableMatch {
    pub label: &'static str,
    pub offset: usize,
    pub values: [u32; 4],
}

/// Everything the inspector reports for one file
#[derive(Clone, Debug, Serialize)]
pub struct FileReport {
    pub path: String,
    pub file_name: String,
    pub install_path: String,
    pub size: usize,
    pub modified: String,
    pub matches: Vec<TableMatch>,
}

impl FileReport {
    pub fn from_image(image: &ExecutableImage, tables: &[JumpTable]) -> Self {
        Self {
            path: image.path.display().to_string(),
            file_name: image.file_name(),
            install_path: image.install_path(),
            size: image.size(),
            modified: image.modified.map(format_date).unwrap_or_default(),
            matches: find_tables(&image.bytes, tables),
        }
    }
}

/// Reads `count` little-endian u32 values, `None` if any falls outside `data`
pub fn read_u32_array(data: &[u8], start: usize, count: usize) -> Option<Vec<u32>> {
    (0..count)
        .map(|i| {
            let offset = start + i * JumpTable::ENTRY_SIZE;
            data.get(offset..offset + JumpTable::ENTRY_SIZE)
                .map(LittleEndian::read_u32)
        })
        .collect()
}

/// Returns every table whose four entries are present at its offset
pub fn find_tables(data: &[u8], tables: &[JumpTable]) -> Vec<TableMatch> {
    tables
        .iter()
        .filter_map(|table| {
            let values = read_u32_array(data, table.offset, table.entries.len())?;
            if values.as_slice() != table.entries.as_slice() {
                return None;
            }
            tracing::debug!("Found {} at 0x{:08x}", table.label, table.offset);
            Some(TableMatch {
                label: table.label,
                offset: table.offset,
                values: table.entries,
            })
        })
        .collect()
}

/// Formats a timestamp as `MM/DD/YYYY`
///
/// The date is taken in UTC, not the local time zone, so a file modified
/// close to midnight may show the neighbouring day.
pub fn format_date(time: SystemTime) -> String {
    let secs = match time.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(before) => -(before.duration().as_secs() as i64),
    };
    let (year, month, day) = civil_from_days(secs.div_euclid(86_400));
    format!("{:02}/{:02}/{:04}", month, day, year)
}

// Days since 1970-01-01 to a proleptic Gregorian date
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
