// 🗄️ Ledger Store
// Append-only CSV file with a fixed schema

use crate::error::Result;
use crate::transaction::{LedgerRow, Transaction, DATE_FORMAT, LEDGER_COLUMNS};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, ErrorKind, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Default ledger file name, relative to the working directory
pub const DEFAULT_LEDGER_FILE: &str = "data.csv";

/// StoreConfig - where the ledger lives and how dates are written
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub date_format: String,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LEDGER_FILE),
            date_format: DATE_FORMAT.to_string(),
        }
    }
}

/// LedgerStore - the persisted transaction log
///
/// Single-process, single-writer. Appends are open-append-close with no
/// locking, and a crash mid-append leaves whatever the OS wrote.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    config: StoreConfig,
}

impl LedgerStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Construct and make sure the file exists
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = Self::new(config);
        store.initialize()?;
        Ok(store)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Create a header-only ledger if none exists.
    ///
    /// Returns `true` when the file was created. An existing file is never
    /// touched, even an empty one.
    pub fn initialize(&self) -> Result<bool> {
        let file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.config.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(LEDGER_COLUMNS)?;
        writer.flush()?;

        log::info!("Initialized ledger at {}", self.config.path.display());
        Ok(true)
    }

    /// Add one row at the end of the file
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        self.initialize()?;

        let file = OpenOptions::new().append(true).open(&self.config.path)?;
        let blank = file.metadata()?.len() == 0;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        // An existing but empty file has no header yet
        if blank {
            writer.write_record(LEDGER_COLUMNS)?;
        }
        writer.serialize(transaction.to_row(&self.config.date_format))?;
        writer.flush()?;

        log::debug!(
            "Appended {} {:.2} on {} to {}",
            transaction.category,
            transaction.amount,
            transaction.date,
            self.config.path.display()
        );
        Ok(())
    }

    /// Every row, in on-disk (insertion) order
    pub fn read_all(&self) -> Result<Vec<LedgerRow>> {
        self.initialize()?;

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.config.path)?;

        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            let row: LedgerRow = result?;
            rows.push(row);
        }

        Ok(rows)
    }

    /// Drop every data row, keeping the header line. Irreversible.
    pub fn reset(&self) -> Result<()> {
        if self.initialize()? {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.config.path)?;

        let mut header = String::new();
        BufReader::new(&file).read_line(&mut header)?;

        if header.trim().is_empty() {
            file.set_len(0)?;
            file.seek(SeekFrom::Start(0))?;
            let mut writer = csv::Writer::from_writer(file);
            writer.write_record(LEDGER_COLUMNS)?;
            writer.flush()?;
        } else {
            file.set_len(header.len() as u64)?;
            if !header.ends_with('\n') {
                file.seek(SeekFrom::End(0))?;
                file.write_all(b"\n")?;
            }
        }

        log::info!("Reset ledger at {}", self.config.path.display());
        Ok(())
    }
}
