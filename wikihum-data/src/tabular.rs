//! CSV input and output for the maintenance workflows.
//!
//! Transfer and neighborhood inputs carry a header row. Link lists may come
//! with or without one: a first row that is not an entity link is taken as
//! the header. Link lists and transfer rows are read positionally;
//! neighborhood rows are read by column name.

use std::{collections::HashMap, io};

use camino::{Utf8Path, Utf8PathBuf};
use csv::{Reader, ReaderBuilder, Writer};
use log::debug;
use thiserror::Error;
use wikihum_core::{
    EntityId,
    tasks::{
        missing_terms::IncompleteEntity, neighborhood_fix::NeighborhoodRow, transfer::TransferRow,
    },
};
use wikihum_fs::{create_utf8_file, open_utf8_file};

/// Header of the missing-terms output.
pub const INCOMPLETE_HEADER: [&str; 6] = [
    "link",
    "id",
    "label_pl",
    "label_en",
    "description_pl",
    "description_en",
];

/// Errors raised while reading or writing CSV files.
#[derive(Debug, Error)]
pub enum TabularError {
    /// The input file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The output file could not be created.
    #[error("failed to create {path}: {source}")]
    Create {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// The file is not valid CSV or could not be written.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// File path.
        path: Utf8PathBuf,
        /// Parser or writer error.
        source: csv::Error,
    },
    /// A required column is absent from the header.
    #[error("{path} has no {column:?} column")]
    MissingColumn {
        /// Input path.
        path: Utf8PathBuf,
        /// Column name.
        column: String,
    },
    /// A row has fewer fields than the format needs.
    #[error("{path}: row {row} has fewer than {expected} fields")]
    ShortRow {
        /// Input path.
        path: Utf8PathBuf,
        /// One-based data row number.
        row: usize,
        /// Fields required.
        expected: usize,
    },
}

/// Header and data rows of a CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Column names.
    pub headers: Vec<String>,
    /// Data rows, each as long as `headers` or shorter.
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Position of column `name`.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

fn csv_error(path: &Utf8Path) -> impl Fn(csv::Error) -> TabularError + '_ {
    move |source| TabularError::Csv {
        path: path.to_owned(),
        source,
    }
}

/// Read `path` into memory.
///
/// # Errors
/// Fails when the file cannot be opened or parsed.
pub fn read_table(path: &Utf8Path) -> Result<Table, TabularError> {
    let mut reader = open_reader(path, true)?;
    let headers = reader
        .headers()
        .map_err(csv_error(path))?
        .iter()
        .map(str::to_owned)
        .collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
        .collect::<Result<Vec<Vec<String>>, _>>()
        .map_err(csv_error(path))?;
    debug!("read {} rows from {path}", rows.len());
    Ok(Table { headers, rows })
}

fn open_reader(
    path: &Utf8Path,
    has_headers: bool,
) -> Result<Reader<impl io::Read>, TabularError> {
    let file = open_utf8_file(path).map_err(|source| TabularError::Open {
        path: path.to_owned(),
        source,
    })?;
    Ok(ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .from_reader(file))
}

/// Write `table` to `path`, replacing any existing file.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_table(path: &Utf8Path, table: &Table) -> Result<(), TabularError> {
    let mut writer = create_writer(path)?;
    writer.write_record(&table.headers).map_err(csv_error(path))?;
    for row in &table.rows {
        writer.write_record(row).map_err(csv_error(path))?;
    }
    flush(writer, path)
}

fn create_writer(path: &Utf8Path) -> Result<Writer<impl io::Write>, TabularError> {
    let file = create_utf8_file(path).map_err(|source| TabularError::Create {
        path: path.to_owned(),
        source,
    })?;
    Ok(Writer::from_writer(file))
}

fn flush<W: io::Write>(mut writer: Writer<W>, path: &Utf8Path) -> Result<(), TabularError> {
    writer.flush().map_err(|source| TabularError::Csv {
        path: path.to_owned(),
        source: source.into(),
    })
}

fn fields<const N: usize>(
    path: &Utf8Path,
    index: usize,
    row: &[String],
) -> Result<[String; N], TabularError> {
    row.get(..N)
        .and_then(|slice| <[String; N]>::try_from(slice.to_vec()).ok())
        .ok_or_else(|| TabularError::ShortRow {
            path: path.to_owned(),
            row: index + 1,
            expected: N,
        })
}

/// Entity links from the first column of `path`; blank cells are skipped.
///
/// The first row is dropped as a header when its first cell is not an
/// entity link.
///
/// # Errors
/// Fails when the file cannot be read.
pub fn read_links(path: &Utf8Path) -> Result<Vec<String>, TabularError> {
    let mut reader = open_reader(path, false)?;
    let mut links = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error(path))?;
        let link = record.get(0).map_or("", str::trim);
        if index == 0 && EntityId::parse(link).is_err() {
            continue;
        }
        if !link.is_empty() {
            links.push(link.to_owned());
        }
    }
    debug!("read {} links from {path}", links.len());
    Ok(links)
}

/// Transfer rows: link, label and PRNG identifier, in that column order.
///
/// # Errors
/// Fails when the file cannot be read or a row has fewer than three fields.
pub fn read_transfer_rows(path: &Utf8Path) -> Result<Vec<TransferRow>, TabularError> {
    let table = read_table(path)?;
    table
        .rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let [link, label, prng] = fields::<3>(path, index, row)?;
            Ok(TransferRow {
                link: link.trim().to_owned(),
                label,
                prng: prng.trim().to_owned(),
            })
        })
        .collect()
}

/// Neighborhood rows from the `item`, `value` and `newValue` columns.
///
/// # Errors
/// Fails when the file cannot be read or a column is missing.
pub fn read_neighborhood_rows(path: &Utf8Path) -> Result<Vec<NeighborhoodRow>, TabularError> {
    let table = read_table(path)?;
    let column = |name: &str| {
        table.column(name).ok_or_else(|| TabularError::MissingColumn {
            path: path.to_owned(),
            column: name.to_owned(),
        })
    };
    let (item, value, new_value) = (column("item")?, column("value")?, column("newValue")?);
    let cell = |row: &[String], at: usize| row.get(at).map_or_else(String::new, |c| c.trim().to_owned());
    Ok(table
        .rows
        .iter()
        .map(|row| NeighborhoodRow {
            item: cell(row, item),
            value: cell(row, value),
            new_value: cell(row, new_value),
        })
        .collect())
}

/// Write the missing-terms rows; absent terms become empty cells.
///
/// # Errors
/// Fails when the file cannot be created or written.
pub fn write_incomplete_entities(
    path: &Utf8Path,
    entities: &[IncompleteEntity],
) -> Result<(), TabularError> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(INCOMPLETE_HEADER)
        .map_err(csv_error(path))?;
    for entity in entities {
        let id = entity.id.to_string();
        let cells = [
            entity.link.as_str(),
            id.as_str(),
            entity.label_pl.as_deref().unwrap_or_default(),
            entity.label_en.as_deref().unwrap_or_default(),
            entity.description_pl.as_deref().unwrap_or_default(),
            entity.description_en.as_deref().unwrap_or_default(),
        ];
        writer.write_record(cells).map_err(csv_error(path))?;
    }
    flush(writer, path)
}

/// Left join of `left` and `right` on column `key`.
///
/// Every left row appears once per matching right row, or once with empty
/// right-hand cells when nothing matches. Non-key columns present on both
/// sides are suffixed `_x` (left) and `_y` (right).
///
/// # Examples
/// ```
/// use wikihum_data::{Table, left_join};
///
/// let left = Table {
///     headers: vec!["item".into(), "value".into()],
///     rows: vec![vec!["Q1".into(), "Q9".into()], vec!["Q2".into(), "Q8".into()]],
/// };
/// let right = Table {
///     headers: vec!["value".into(), "newValue".into()],
///     rows: vec![vec!["Q9".into(), "Q90".into()]],
/// };
/// let joined = left_join(&left, &right, "value").expect("key present");
/// assert_eq!(joined.headers, ["item", "value", "newValue"]);
/// assert_eq!(joined.rows[1], ["Q2", "Q8", ""]);
/// ```
///
/// # Errors
/// Returns the missing column name when `key` is absent from either side.
pub fn left_join(left: &Table, right: &Table, key: &str) -> Result<Table, String> {
    let left_key = left.column(key).ok_or_else(|| key.to_owned())?;
    let right_key = right.column(key).ok_or_else(|| key.to_owned())?;
    let right_columns: Vec<usize> = (0..right.headers.len()).filter(|&i| i != right_key).collect();

    let shared = |name: &String| name != key && right.headers.contains(name) && left.headers.contains(name);
    let mut headers: Vec<String> = left
        .headers
        .iter()
        .map(|name| if shared(name) { format!("{name}_x") } else { name.clone() })
        .collect();
    headers.extend(right_columns.iter().filter_map(|&i| right.headers.get(i)).map(|name| {
        if shared(name) { format!("{name}_y") } else { name.clone() }
    }));

    let mut index: HashMap<&str, Vec<&Vec<String>>> = HashMap::new();
    for row in &right.rows {
        if let Some(value) = row.get(right_key) {
            index.entry(value.as_str()).or_default().push(row);
        }
    }

    let pad = |row: &Vec<String>, width: usize| {
        let mut cells = row.clone();
        cells.resize(width, String::new());
        cells
    };
    let mut rows = Vec::with_capacity(left.rows.len());
    for row in &left.rows {
        let left_cells = pad(row, left.headers.len());
        let matches = row
            .get(left_key)
            .and_then(|value| index.get(value.as_str()))
            .map_or(&[][..], Vec::as_slice);
        if matches.is_empty() {
            let mut cells = left_cells;
            cells.resize(headers.len(), String::new());
            rows.push(cells);
            continue;
        }
        for matched in matches {
            let mut cells = left_cells.clone();
            cells.extend(
                right_columns
                    .iter()
                    .map(|&i| matched.get(i).cloned().unwrap_or_default()),
            );
            rows.push(cells);
        }
    }
    Ok(Table { headers, rows })
}

/// Join the files at `left` and `right` on `key` and write the result to `out`.
///
/// Returns the number of rows written.
///
/// # Errors
/// Fails when an input cannot be read, lacks `key`, or the output cannot be
/// written.
pub fn join_files(
    left: &Utf8Path,
    right: &Utf8Path,
    key: &str,
    out: &Utf8Path,
) -> Result<usize, TabularError> {
    let left_table = read_table(left)?;
    let right_table = read_table(right)?;
    let joined = left_join(&left_table, &right_table, key).map_err(|column| {
        let path = if left_table.column(key).is_none() { left } else { right };
        TabularError::MissingColumn {
            path: path.to_owned(),
            column,
        }
    })?;
    write_table(out, &joined)?;
    Ok(joined.rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::fs;
    use tempfile::TempDir;

    #[fixture]
    fn dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn write(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8 temp path");
        fs::write(&path, contents).expect("write input");
        path
    }

    #[rstest]
    #[case::bare_links("https://w/wiki/Item:Q1\nhttps://w/wiki/Item:Q2\n")]
    #[case::bare_ids("Q1\nQ2\n")]
    fn headerless_link_lists_keep_their_first_row(#[case] contents: &str, dir: TempDir) {
        let path = write(&dir, "deleted.csv", contents);
        let links = read_links(&path).expect("links read");
        let ids: Vec<String> = links
            .iter()
            .map(|link| EntityId::parse(link).expect("entity link").to_string())
            .collect();
        assert_eq!(ids, vec!["Q1", "Q2"]);
    }

    #[rstest]
    fn links_come_from_the_first_column(dir: TempDir) {
        let path = write(
            &dir,
            "links.csv",
            "link,label\nhttps://wikihum.example/entity/Q1,Kraków\n,\n https://wikihum.example/entity/Q2 ,x\n",
        );
        assert_eq!(
            read_links(&path).expect("links read"),
            vec![
                "https://wikihum.example/entity/Q1",
                "https://wikihum.example/entity/Q2"
            ]
        );
    }

    #[rstest]
    fn transfer_rows_are_positional(dir: TempDir) {
        let path = write(
            &dir,
            "ahp.csv",
            "AHP,nazwa,PRNG\nhttps://wikihum.example/entity/Q5,\"Kraków, miasto\",104123\n",
        );
        let rows = read_transfer_rows(&path).expect("rows read");
        assert_eq!(
            rows,
            vec![TransferRow {
                link: "https://wikihum.example/entity/Q5".to_owned(),
                label: "Kraków, miasto".to_owned(),
                prng: "104123".to_owned(),
            }]
        );
    }

    #[rstest]
    fn short_transfer_rows_are_rejected(dir: TempDir) {
        let path = write(&dir, "ahp.csv", "AHP,nazwa,PRNG\nQ5,Kraków\n");
        let err = read_transfer_rows(&path).expect_err("short row");
        assert!(matches!(err, TabularError::ShortRow { row: 1, expected: 3, .. }));
    }

    #[rstest]
    fn neighborhood_rows_use_named_columns(dir: TempDir) {
        let path = write(&dir, "joined.csv", "newValue,item,value\nQ30,Q10,Q20\n");
        let rows = read_neighborhood_rows(&path).expect("rows read");
        assert_eq!(
            rows,
            vec![NeighborhoodRow {
                item: "Q10".to_owned(),
                value: "Q20".to_owned(),
                new_value: "Q30".to_owned(),
            }]
        );
    }

    #[rstest]
    fn neighborhood_rows_need_every_column(dir: TempDir) {
        let path = write(&dir, "joined.csv", "item,value\nQ10,Q20\n");
        let err = read_neighborhood_rows(&path).expect_err("missing column");
        assert!(matches!(err, TabularError::MissingColumn { column, .. } if column == "newValue"));
    }

    #[rstest]
    fn missing_files_report_their_path(dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("absent.csv")).expect("utf8 path");
        let err = read_links(&path).expect_err("absent file");
        assert!(err.to_string().contains("absent.csv"));
    }

    #[rstest]
    fn incomplete_entities_leave_absent_terms_empty(dir: TempDir) {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("out/missing.csv")).expect("utf8 path");
        let rows = [IncompleteEntity {
            link: "https://wikihum.example/wiki/Item:Q7".to_owned(),
            id: EntityId::from_static("Q7"),
            label_pl: Some("Gniezno".to_owned()),
            label_en: None,
            description_pl: None,
            description_en: Some("town".to_owned()),
        }];
        write_incomplete_entities(&path, &rows).expect("written");
        let written = fs::read_to_string(&path).expect("read back");
        assert_eq!(
            written,
            "link,id,label_pl,label_en,description_pl,description_en\n\
             https://wikihum.example/wiki/Item:Q7,Q7,Gniezno,,,town\n"
        );
    }

    #[rstest]
    fn left_join_repeats_rows_per_match_and_suffixes_shared_columns() {
        let left = Table {
            headers: vec!["item".into(), "value".into(), "label".into()],
            rows: vec![
                vec!["Q1".into(), "Q9".into(), "a".into()],
                vec!["Q2".into(), "Q8".into(), "b".into()],
            ],
        };
        let right = Table {
            headers: vec!["label".into(), "value".into(), "newValue".into()],
            rows: vec![
                vec!["x".into(), "Q9".into(), "Q90".into()],
                vec!["y".into(), "Q9".into(), "Q91".into()],
            ],
        };
        let joined = left_join(&left, &right, "value").expect("key present");
        assert_eq!(joined.headers, ["item", "value", "label_x", "label_y", "newValue"]);
        assert_eq!(
            joined.rows,
            vec![
                vec!["Q1", "Q9", "a", "x", "Q90"],
                vec!["Q1", "Q9", "a", "y", "Q91"],
                vec!["Q2", "Q8", "b", "", ""],
            ]
        );
    }

    #[rstest]
    fn left_join_requires_the_key() {
        let left = Table {
            headers: vec!["item".into()],
            rows: Vec::new(),
        };
        assert_eq!(left_join(&left, &Table::default(), "value"), Err("value".to_owned()));
    }
}
