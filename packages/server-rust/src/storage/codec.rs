//! CSV encoding of the record table.
//!
//! Layout: a header row followed by one record per line, columns
//! `rank,name,datetime,duration_s,avatar_url`. Fields are quoted only when
//! they contain a separator, quote, or line break. Timestamps use the
//! canonical RFC 3339 UTC form; an absent avatar is an empty field.
//!
//! Decoding is strict: every row is converted into a typed [`Record`] and the
//! first malformed row fails the whole table. Tables written before avatars
//! existed (four columns, no `avatar_url`) are still accepted.

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use podium_core::{format_timestamp, parse_timestamp, Record, RecordTable};

use super::error::{ReadError, WriteError};

/// Canonical column names, in file order.
pub const COLUMNS: [&str; 5] = ["rank", "name", "datetime", "duration_s", "avatar_url"];

const RANK: usize = 0;
const NAME: usize = 1;
const DATETIME: usize = 2;
const DURATION: usize = 3;
const AVATAR: usize = 4;

/// Column layout detected from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Current,
    /// No `avatar_url` column.
    Legacy,
}

impl Layout {
    fn detect(headers: &StringRecord) -> Result<Self, ReadError> {
        let found: Vec<&str> = headers.iter().map(str::trim).collect();
        if found.as_slice() == COLUMNS.as_slice() {
            Ok(Self::Current)
        } else if found.as_slice() == &COLUMNS[..AVATAR] {
            Ok(Self::Legacy)
        } else {
            Err(ReadError::Header {
                found: found.into_iter().map(str::to_string).collect(),
            })
        }
    }
}

/// Serializes a table, header included.
///
/// # Errors
///
/// Returns [`WriteError::Encode`] if the CSV writer fails.
pub fn encode_table(table: &RecordTable) -> Result<Vec<u8>, WriteError> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(COLUMNS).map_err(encode_error)?;
    for record in table {
        writer
            .write_record([
                record.rank.to_string().as_str(),
                record.name.as_str(),
                format_timestamp(&record.datetime).as_str(),
                record.duration_s.to_string().as_str(),
                record.avatar_url.as_deref().unwrap_or_default(),
            ])
            .map_err(encode_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| WriteError::Encode(e.to_string()))
}

/// Parses a table, validating the header and every row.
///
/// Empty (or whitespace-only) input decodes to an empty table.
///
/// # Errors
///
/// - [`ReadError::Header`] if the header is not a known layout.
/// - [`ReadError::Row`] for a wrong column count, an unparseable number or
///   timestamp, a zero rank, or a blank name.
pub fn decode_table(bytes: &[u8]) -> Result<RecordTable, ReadError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordTable::new());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let layout = Layout::detect(reader.headers().map_err(row_error)?)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(row_error)?;
        records.push(decode_row(&row, layout)?);
    }
    Ok(RecordTable::from_records(records))
}

fn decode_row(row: &StringRecord, layout: Layout) -> Result<Record, ReadError> {
    let line = row.position().map_or(0, csv::Position::line);
    let malformed = |reason: String| ReadError::Row { line, reason };
    let field = |index: usize| {
        row.get(index)
            .ok_or_else(|| malformed(format!("missing column {}", COLUMNS[index])))
    };

    let rank_raw = field(RANK)?;
    let rank: u32 = rank_raw
        .trim()
        .parse()
        .map_err(|e| malformed(format!("rank {rank_raw:?}: {e}")))?;
    if rank == 0 {
        return Err(malformed("rank must be positive".to_string()));
    }

    let name = field(NAME)?;
    if name.trim().is_empty() {
        return Err(malformed("name is empty".to_string()));
    }

    let datetime = parse_timestamp(field(DATETIME)?).map_err(|e| malformed(e.to_string()))?;

    let duration_raw = field(DURATION)?;
    let duration_s: u64 = duration_raw
        .trim()
        .parse()
        .map_err(|e| malformed(format!("duration_s {duration_raw:?}: {e}")))?;

    let avatar_url = match layout {
        Layout::Current => Some(field(AVATAR)?)
            .filter(|url| !url.is_empty())
            .map(str::to_string),
        Layout::Legacy => None,
    };

    Ok(Record {
        rank,
        name: name.to_string(),
        datetime,
        duration_s,
        avatar_url,
    })
}

fn row_error(err: csv::Error) -> ReadError {
    ReadError::Row {
        line: err.position().map_or(0, csv::Position::line),
        reason: err.to_string(),
    }
}

fn encode_error(err: csv::Error) -> WriteError {
    WriteError::Encode(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record(rank: u32, name: &str, duration_s: u64, avatar_url: Option<&str>) -> Record {
        Record {
            rank,
            name: name.to_string(),
            datetime: Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap(),
            duration_s,
            avatar_url: avatar_url.map(str::to_string),
        }
    }

    fn decode_str(text: &str) -> Result<RecordTable, ReadError> {
        decode_table(text.as_bytes())
    }

    #[test]
    fn empty_table_encodes_header_only() {
        let bytes = encode_table(&RecordTable::new()).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "rank,name,datetime,duration_s,avatar_url\n"
        );
    }

    #[test]
    fn encodes_one_line_per_record() {
        let table = RecordTable::from_records(vec![
            record(1, "Anna", 30_044, Some("https://cdn.example.org/a.png")),
            record(2, "Ben", 50_000, None),
        ]);
        let text = String::from_utf8(encode_table(&table).unwrap()).unwrap();
        assert_eq!(
            text,
            "rank,name,datetime,duration_s,avatar_url\n\
             1,Anna,2024-06-01T08:30:00Z,30044,https://cdn.example.org/a.png\n\
             2,Ben,2024-06-01T08:30:00Z,50000,\n"
        );
    }

    #[test]
    fn quotes_embedded_separators() {
        let table = RecordTable::from_records(vec![record(1, "Doe, \"JD\" Jane", 10, None)]);
        let text = String::from_utf8(encode_table(&table).unwrap()).unwrap();
        assert!(text.contains("\"Doe, \"\"JD\"\" Jane\""));
        assert_eq!(decode_table(text.as_bytes()).unwrap(), table);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let table = RecordTable::from_records(vec![
            record(1, "Anna", 30_044, Some("https://cdn.example.org/a.png")),
            record(1, "Multi\nLine", 30_044, None),
            record(3, "Ben", 50_000, None),
        ]);
        let bytes = encode_table(&table).unwrap();
        assert_eq!(decode_table(&bytes).unwrap(), table);
    }

    #[test]
    fn header_only_decodes_to_empty_table() {
        let table = decode_str("rank,name,datetime,duration_s,avatar_url\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn zero_bytes_decode_to_empty_table() {
        assert!(decode_table(b"").unwrap().is_empty());
    }

    #[test]
    fn legacy_layout_without_avatar_is_accepted() {
        let table = decode_str(
            "rank,name,datetime,duration_s\n\
             1,Anna,2024-06-01 08:30:00,30044\n",
        )
        .unwrap();
        assert_eq!(table.records(), &[record(1, "Anna", 30_044, None)]);
    }

    #[test]
    fn rejects_unknown_header() {
        let err = decode_str("place,who,when,secs,avatar\n").unwrap_err();
        assert!(matches!(err, ReadError::Header { .. }));
    }

    #[test]
    fn rejects_wrong_column_count() {
        let err = decode_str(
            "rank,name,datetime,duration_s,avatar_url\n\
             1,Anna,2024-06-01T08:30:00Z,30044\n",
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::Row { line: 2, .. }), "{err:?}");
    }

    #[test]
    fn rejects_unparseable_duration() {
        let err = decode_str(
            "rank,name,datetime,duration_s,avatar_url\n\
             1,Anna,2024-06-01T08:30:00Z,fast,\n",
        )
        .unwrap_err();
        match err {
            ReadError::Row { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("duration_s"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_duration() {
        let err = decode_str(
            "rank,name,datetime,duration_s,avatar_url\n\
             1,Anna,2024-06-01T08:30:00Z,-3,\n",
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::Row { .. }));
    }

    #[test]
    fn rejects_unparseable_timestamp() {
        let err = decode_str(
            "rank,name,datetime,duration_s,avatar_url\n\
             1,Anna,last tuesday,30044,\n",
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::Row { .. }));
    }

    #[test]
    fn rejects_zero_rank() {
        let err = decode_str(
            "rank,name,datetime,duration_s,avatar_url\n\
             0,Anna,2024-06-01T08:30:00Z,30044,\n",
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::Row { .. }));
    }

    #[test]
    fn rejects_blank_name() {
        let err = decode_str(
            "rank,name,datetime,duration_s,avatar_url\n\
             1,  ,2024-06-01T08:30:00Z,30044,\n",
        )
        .unwrap_err();
        assert!(matches!(err, ReadError::Row { .. }));
    }
}
