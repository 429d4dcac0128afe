//! odsgrid CLI - read and edit .ods cells by address

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use odsgrid::prelude::*;
use odsgrid::TableMut;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "odsgrid")]
#[command(author, version, about = "Address cells in OpenDocument spreadsheets")]
struct Cli {
    /// Print debug logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables of a spreadsheet
    Tables {
        /// Spreadsheet file (".ods" is appended if missing)
        input: PathBuf,
    },

    /// Print a cell ("B3") or a range ("A1:C5", tab-separated)
    Get {
        input: PathBuf,

        /// Table name or position (negative counts from the end)
        #[arg(allow_hyphen_values = true)]
        table: String,

        address: String,
    },

    /// Set an existing cell and save; numbers are stored as floats, anything
    /// else as text
    Set {
        input: PathBuf,

        /// Table name or position (negative counts from the end)
        #[arg(allow_hyphen_values = true)]
        table: String,

        address: String,

        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Rename a table and save
    Rename {
        input: PathBuf,

        /// Table position (negative counts from the end)
        #[arg(allow_hyphen_values = true)]
        index: isize,

        name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(level));

    match cli.command {
        Commands::Tables { input } => list_tables(&input),
        Commands::Get {
            input,
            table,
            address,
        } => get(&input, &table, &address),
        Commands::Set {
            input,
            table,
            address,
            value,
        } => set(&input, &table, &address, &value),
        Commands::Rename { input, index, name } => rename(&input, index, &name),
    }
}

/// Open a spreadsheet that must already exist
fn open_existing(input: &Path) -> Result<Spreadsheet> {
    let sheet = Spreadsheet::open(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;
    if !sheet.path().is_file() {
        bail!("'{}' does not exist", sheet.path().display());
    }
    Ok(sheet)
}

/// A table argument is a position when it parses as one, otherwise a name
fn table_index(table: &str) -> Index {
    match table.parse::<isize>() {
        Ok(position) => Index::Position(position),
        Err(_) => Index::name(table),
    }
}

/// A number becomes a float cell, anything else a string cell
fn parse_value(value: &str) -> CellValue {
    match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Float(n),
        _ => CellValue::string(value),
    }
}

fn list_tables(input: &Path) -> Result<()> {
    let sheet = open_existing(input)?;

    for (i, table) in sheet.tables().iter().enumerate() {
        println!("{}\t{}\t{} rows", i, table.name().unwrap_or(""), table.len());
    }

    Ok(())
}

fn get(input: &Path, table: &str, address: &str) -> Result<()> {
    let sheet = open_existing(input)?;
    let table = sheet
        .select(&[table_index(table)])
        .with_context(|| format!("Table '{}' not found", table))?
        .as_table()
        .context("Selection is not a table")?;

    if address.contains(':') {
        let rows = table
            .range(address)
            .with_context(|| format!("Failed to read range '{}'", address))?;
        for row in rows {
            let line: Vec<String> = row.iter().map(|c| c.text()).collect();
            println!("{}", line.join("\t"));
        }
    } else {
        let cell = table
            .cell(address)
            .with_context(|| format!("Failed to read cell '{}'", address))?;
        println!("{}", cell.text());
    }

    Ok(())
}

fn set(input: &Path, table: &str, address: &str, value: &str) -> Result<()> {
    let mut sheet = open_existing(input)?;
    let value = parse_value(value);

    {
        let mut table = table_mut(&mut sheet, table)?;
        table
            .cell_mut(address)
            .with_context(|| format!("Failed to address cell '{}'", address))?
            .set_value(value);
    }

    sheet
        .save()
        .with_context(|| format!("Failed to write '{}'", sheet.path().display()))?;
    eprintln!("Updated {} in '{}'", address, sheet.path().display());

    Ok(())
}

fn table_mut<'a>(sheet: &'a mut Spreadsheet, table: &str) -> Result<TableMut<'a>> {
    let found = match table_index(table) {
        Index::Position(position) => sheet.table_mut(position),
        _ => sheet.table_by_name_mut(table),
    };
    found.with_context(|| format!("Table '{}' not found", table))
}

fn rename(input: &Path, index: isize, name: &str) -> Result<()> {
    let mut sheet = open_existing(input)?;

    sheet
        .table_mut(index)
        .with_context(|| format!("Table index {} not found", index))?
        .set_name(name);

    sheet
        .save()
        .with_context(|| format!("Failed to write '{}'", sheet.path().display()))?;
    eprintln!("Renamed table {} to '{}'", index, name);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture(dir: &Path) -> PathBuf {
        let path = dir.join("book.ods");
        let mut sheet = Spreadsheet::create(&path);
        {
            let mut table = sheet.add_table("Data");
            let mut row = table.append_row();
            row.append_cell().set_value("a".into());
            row.append_cell().set_value("b".into());
        }
        sheet.save().unwrap();
        path
    }

    #[test]
    fn test_table_index() {
        assert_eq!(table_index("0"), Index::Position(0));
        assert_eq!(table_index("-1"), Index::Position(-1));
        assert_eq!(table_index("Data"), Index::Name("Data".into()));
        assert_eq!(table_index("2014"), Index::Position(2014));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("12.5"), CellValue::Float(12.5));
        assert_eq!(parse_value("-3"), CellValue::Float(-3.0));
        assert_eq!(parse_value("hello"), CellValue::string("hello"));
        assert_eq!(parse_value("inf"), CellValue::string("inf"));
        assert_eq!(parse_value(""), CellValue::string(""));
    }

    #[test]
    fn test_negative_positions_parse() {
        let cli = Cli::try_parse_from(["odsgrid", "get", "book.ods", "-1", "A1"]).unwrap();
        match cli.command {
            Commands::Get { table, .. } => assert_eq!(table, "-1"),
            _ => panic!("expected get"),
        }

        let cli =
            Cli::try_parse_from(["odsgrid", "set", "book.ods", "-1", "A1", "-2.5"]).unwrap();
        match cli.command {
            Commands::Set { table, value, .. } => {
                assert_eq!(table, "-1");
                assert_eq!(value, "-2.5");
            }
            _ => panic!("expected set"),
        }

        let cli = Cli::try_parse_from(["odsgrid", "-v", "rename", "book.ods", "-1", "X"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_set_and_rename_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(dir.path());

        set(&path, "Data", "B1", "42").unwrap();
        set(&path, "-1", "A1", "text").unwrap();
        rename(&path, 0, "Renamed").unwrap();

        let sheet = Spreadsheet::open(&path).unwrap();
        let table = sheet.table_by_name("Renamed").unwrap();
        assert_eq!(table.cell("A1").unwrap().value(), CellValue::string("text"));
        assert_eq!(table.cell("B1").unwrap().value(), CellValue::Float(42.0));
    }

    #[test]
    fn test_missing_inputs_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        assert!(set(&missing, "Sheet1", "A1", "1").is_err());
        assert!(!dir.path().join("nope.ods").exists());
        assert!(list_tables(&missing).is_err());
        assert!(get(&missing, "0", "A1").is_err());

        let path = fixture(dir.path());
        assert!(set(&path, "Other", "A1", "1").is_err());
        assert!(set(&path, "Data", "C1", "1").is_err());
        assert!(get(&path, "Data", "A1:B1").is_ok());
        assert!(get(&path, "5", "A1").is_err());
    }
}
