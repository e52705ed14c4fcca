//! File I/O for batch solution archives.
//!
//! Archive files are a zlib stream wrapping the binary format below
//! (integers little endian):
//! - 4 bytes: magic `CAL1`
//! - u8: format version
//! - u32: record count
//! - repeat per record:
//!   - u8 month index (0 = Jan), u8 day, u8 weekday index (0 = Sun)
//!   - u32: solution count
//!   - repeat per solution:
//!     - u8: piece count
//!     - repeat per piece: u8 piece name (ASCII), u8 cell count, one u8 per
//!       cell index

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::board::Board;
use crate::calendar::{CalendarDate, Month, Weekday};
use crate::error::PuzzleError;
use crate::solver::solve_date;

const MAGIC: &[u8; 4] = b"CAL1";
const VERSION: u8 = 1;

/// Cells occupied by each piece in one solution.
pub type PieceCells = BTreeMap<char, Vec<usize>>;

/// Every solution of one date, as per-piece cell indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateSolutions {
    pub date: CalendarDate,
    pub solutions: Vec<PieceCells>,
}

impl DateSolutions {
    /// Solves `date` and records its solutions.
    pub fn solve(date: CalendarDate) -> Result<Self, PuzzleError> {
        let boards = solve_date(&date)?;
        Ok(Self::from_boards(date, &boards))
    }

    pub fn from_boards(date: CalendarDate, boards: &[Board]) -> Self {
        Self {
            date,
            solutions: boards.iter().map(Board::piece_cells).collect(),
        }
    }
}

/// Saves records to `path` compressed, replacing any existing file.
pub fn save(path: &Path, records: &[DateSolutions]) -> Result<(), PuzzleError> {
    let mut encoder = ZlibEncoder::new(BufWriter::new(File::create(path)?), Compression::best());
    write_records(&mut encoder, records)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Loads every record from `path`.
pub fn load_all(path: &Path) -> Result<Vec<DateSolutions>, PuzzleError> {
    read_records(&mut open(path)?)
}

/// Returns the number of records in `path` without loading them.
pub fn count(path: &Path) -> Result<usize, PuzzleError> {
    read_header(&mut open(path)?)
}

fn open(path: &Path) -> Result<ZlibDecoder<BufReader<File>>, PuzzleError> {
    Ok(ZlibDecoder::new(BufReader::new(File::open(path)?)))
}

pub fn write_records(writer: &mut impl Write, records: &[DateSolutions]) -> Result<(), PuzzleError> {
    writer.write_all(MAGIC)?;
    writer.write_all(&[VERSION])?;
    write_u32(writer, records.len())?;

    for record in records {
        let date = &record.date;
        writer.write_all(&[
            date.month().index() as u8,
            date.day(),
            date.weekday().index() as u8,
        ])?;
        write_u32(writer, record.solutions.len())?;

        for solution in &record.solutions {
            writer.write_all(&[to_byte(solution.len(), "piece count")?])?;
            for (&name, cells) in solution {
                if !name.is_ascii() {
                    return Err(corrupt(format!("piece name '{name}' is not ASCII")));
                }
                writer.write_all(&[name as u8, to_byte(cells.len(), "cell count")?])?;
                for &cell in cells {
                    writer.write_all(&[to_byte(cell, "cell index")?])?;
                }
            }
        }
    }
    Ok(())
}

pub fn read_records(reader: &mut impl Read) -> Result<Vec<DateSolutions>, PuzzleError> {
    let record_count = read_header(reader)?;
    // the count is untrusted until the records are actually read
    let mut records = Vec::with_capacity(record_count.min(CalendarDate::all().count()));

    for _ in 0..record_count {
        let [month, day, weekday] = read_bytes::<3>(reader)?;
        let month = Month::from_index(usize::from(month))
            .ok_or_else(|| corrupt(format!("month index {month}")))?;
        let weekday = Weekday::from_index(usize::from(weekday))
            .ok_or_else(|| corrupt(format!("weekday index {weekday}")))?;
        let date = CalendarDate::new(day, month, weekday)
            .map_err(|_| corrupt(format!("day {day}")))?;

        let solution_count = read_u32(reader)?;
        let mut solutions = Vec::new();
        for _ in 0..solution_count {
            let [piece_count] = read_bytes::<1>(reader)?;
            let mut solution = PieceCells::new();
            for _ in 0..piece_count {
                let [name, cell_count] = read_bytes::<2>(reader)?;
                let mut cells = vec![0u8; usize::from(cell_count)];
                reader.read_exact(&mut cells)?;
                solution.insert(char::from(name), cells.into_iter().map(usize::from).collect());
            }
            solutions.push(solution);
        }
        records.push(DateSolutions { date, solutions });
    }
    Ok(records)
}

fn read_header(reader: &mut impl Read) -> Result<usize, PuzzleError> {
    let magic = read_bytes::<4>(reader)?;
    if &magic != MAGIC {
        return Err(corrupt("bad magic".to_string()));
    }
    let [version] = read_bytes::<1>(reader)?;
    if version != VERSION {
        return Err(corrupt(format!("unsupported version {version}")));
    }
    read_u32(reader)
}

fn write_u32(writer: &mut impl Write, value: usize) -> Result<(), PuzzleError> {
    let value = u32::try_from(value).map_err(|_| corrupt(format!("{value} exceeds u32")))?;
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn read_u32(reader: &mut impl Read) -> Result<usize, PuzzleError> {
    Ok(u32::from_le_bytes(read_bytes::<4>(reader)?) as usize)
}

fn read_bytes<const N: usize>(reader: &mut impl Read) -> Result<[u8; N], PuzzleError> {
    let mut buffer = [0u8; N];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

fn to_byte(value: usize, what: &str) -> Result<u8, PuzzleError> {
    u8::try_from(value).map_err(|_| corrupt(format!("{what} {value} does not fit in a byte")))
}

fn corrupt(reason: String) -> PuzzleError {
    PuzzleError::CorruptArchive { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DateSolutions> {
        let date = CalendarDate::new(4, Month::Jul, Weekday::Thu).unwrap();
        let mut first = PieceCells::new();
        first.insert('T', vec![3, 4, 5, 12]);
        first.insert('X', vec![20, 27, 28, 29, 36]);
        let empty = DateSolutions {
            date: CalendarDate::new(31, Month::Dec, Weekday::Sat).unwrap(),
            solutions: Vec::new(),
        };
        vec![
            DateSolutions {
                date,
                solutions: vec![first.clone(), first],
            },
            empty,
        ]
    }

    #[test]
    fn test_roundtrip_in_memory() {
        let records = sample();
        let mut bytes = Vec::new();
        write_records(&mut bytes, &records).unwrap();
        assert_eq!(&bytes[..4], b"CAL1");
        assert_eq!(read_records(&mut bytes.as_slice()).unwrap(), records);
    }

    #[test]
    fn test_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solutions.bin");

        let date = CalendarDate::new(29, Month::Feb, Weekday::Wed).unwrap();
        let records = vec![DateSolutions::solve(date).unwrap()];
        save(&path, &records).unwrap();

        assert_eq!(count(&path).unwrap(), 1);
        let loaded = load_all(&path).unwrap();
        assert_eq!(loaded, records);
        assert_eq!(loaded[0].solutions.len(), 340);
        assert!(loaded[0].solutions.iter().all(|s| s.len() == 10));
    }

    #[test]
    fn test_saved_archive_is_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solutions.bin");

        let date = CalendarDate::new(16, Month::Oct, Weekday::Fri).unwrap();
        let records = vec![DateSolutions::solve(date).unwrap()];
        let mut raw = Vec::new();
        write_records(&mut raw, &records).unwrap();
        save(&path, &records).unwrap();

        let saved = std::fs::read(&path).unwrap();
        assert!(saved.len() < raw.len(), "{} >= {}", saved.len(), raw.len());
        assert_ne!(&saved[..4], MAGIC);
        assert_eq!(load_all(&path).unwrap(), records);
    }

    #[test]
    fn test_uncompressed_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.bin");
        let mut raw = Vec::new();
        write_records(&mut raw, &sample()).unwrap();
        std::fs::write(&path, raw).unwrap();
        assert!(load_all(&path).is_err());
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let bytes = b"NOPE\x00\x00\x00\x00";
        assert!(matches!(
            read_records(&mut bytes.as_slice()),
            Err(PuzzleError::CorruptArchive { .. })
        ));
    }

    fn header(record_count: u32) -> Vec<u8> {
        let mut bytes = b"CAL1".to_vec();
        bytes.push(VERSION);
        bytes.extend_from_slice(&record_count.to_le_bytes());
        bytes
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let mut bytes = header(0);
        bytes[4] = VERSION + 1;
        assert!(matches!(
            read_records(&mut bytes.as_slice()),
            Err(PuzzleError::CorruptArchive { .. })
        ));
    }

    #[test]
    fn test_huge_record_count_fails_cleanly() {
        let bytes = header(u32::MAX);
        assert!(matches!(
            read_records(&mut bytes.as_slice()),
            Err(PuzzleError::Io(_))
        ));
    }

    #[test]
    fn test_huge_solution_count_fails_cleanly() {
        let mut bytes = header(1);
        bytes.extend_from_slice(&[0, 1, 1]);
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            read_records(&mut bytes.as_slice()),
            Err(PuzzleError::Io(_))
        ));
    }

    #[test]
    fn test_truncated_archive_is_an_io_error() {
        let mut bytes = Vec::new();
        write_records(&mut bytes, &sample()).unwrap();
        bytes.truncate(bytes.len() - 3);
        assert!(matches!(
            read_records(&mut bytes.as_slice()),
            Err(PuzzleError::Io(_))
        ));
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        let mut bytes = header(1);
        bytes.extend_from_slice(&[12, 1, 0]);
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            read_records(&mut bytes.as_slice()),
            Err(PuzzleError::CorruptArchive { .. })
        ));
    }

    #[test]
    fn test_invalid_day_is_corrupt() {
        for day in [0, 32] {
            let mut bytes = header(1);
            bytes.extend_from_slice(&[0, day, 0]);
            bytes.extend_from_slice(&0u32.to_le_bytes());
            assert!(matches!(
                read_records(&mut bytes.as_slice()),
                Err(PuzzleError::CorruptArchive { .. })
            ));
        }
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            count(&dir.path().join("missing.bin")),
            Err(PuzzleError::Io(_))
        ));
    }
}
