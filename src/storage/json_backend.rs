use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    errors::{ExpenseError, Result},
    ledger::{Collection, Expense},
    time::{Clock, SystemClock},
    validation::{parse_date, valid_amount},
};

use super::ExpenseStore;

pub const CORRUPT_EXTENSION: &str = "corrupt";
const CORRUPT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const EMPTY_COLLECTION: &str = "[]";

/// Single-file JSON persistence with corruption quarantine.
pub struct JsonExpenseStore {
    path: PathBuf,
    clock: Box<dyn Clock>,
}

impl JsonExpenseStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }

    /// Uses `clock` to stamp quarantined files.
    pub fn with_clock(path: impl Into<PathBuf>, clock: impl Clock + 'static) -> Self {
        Self {
            path: path.into(),
            clock: Box::new(clock),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lists `<file>.<timestamp>.corrupt` siblings of the backing file, sorted by name.
    pub fn corrupt_backups(&self) -> Result<Vec<PathBuf>> {
        let dir = self.parent_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let prefix = format!("{}.", self.file_name());
        let suffix = format!(".{}", CORRUPT_EXTENSION);
        let mut backups = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(&prefix) && name.ends_with(&suffix) && entry.path().is_file() {
                backups.push(entry.path());
            }
        }
        backups.sort();
        Ok(backups)
    }

    /// Path the backing file is renamed to when its contents cannot be decoded.
    pub fn quarantine_path(&self) -> PathBuf {
        let timestamp = self.clock.now().format(CORRUPT_TIMESTAMP_FORMAT);
        self.parent_dir().join(format!(
            "{}.{}.{}",
            self.file_name(),
            timestamp,
            CORRUPT_EXTENSION
        ))
    }

    fn ensure_no_lingering_backup(&self) -> Result<()> {
        if let Some(backup) = self.corrupt_backups()?.into_iter().next() {
            warn!(backup = %backup.display(), "corrupt backup still present");
            return Err(ExpenseError::CorruptionDetected {
                message: format!(
                    "Found corrupted backup file: '{}'. Inspection needed.",
                    backup.display()
                ),
                backup: Some(backup),
            });
        }
        Ok(())
    }

    fn quarantine(&self, reason: &str) -> Result<ExpenseError> {
        let backup = self.quarantine_path();
        fs::rename(&self.path, &backup)?;
        warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            reason,
            "quarantined undecodable expense file"
        );
        Ok(ExpenseError::CorruptionDetected {
            message: format!(
                "Corrupted data detected. Original file backed up as '{}'. Aborting.",
                backup.display()
            ),
            backup: Some(backup),
        })
    }

    fn reset_to_empty(&self) -> Result<Collection> {
        replace_file(&self.path, EMPTY_COLLECTION)?;
        Ok(Vec::new())
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl ExpenseStore for JsonExpenseStore {
    fn load(&self) -> Result<Collection> {
        self.ensure_no_lingering_backup()?;

        if !self.path.exists() {
            debug!(path = %self.path.display(), "creating empty expense file");
            return self.reset_to_empty();
        }
        if fs::metadata(&self.path)?.len() == 0 {
            debug!(path = %self.path.display(), "expense file is empty; rewriting");
            return self.reset_to_empty();
        }

        let bytes = fs::read(&self.path)?;
        match serde_json::from_slice::<Collection>(&bytes) {
            Ok(expenses) => {
                for warning in collection_warnings(&expenses) {
                    warn!(path = %self.path.display(), "{warning}");
                }
                debug!(path = %self.path.display(), count = expenses.len(), "loaded expenses");
                Ok(expenses)
            }
            Err(err) => Err(self.quarantine(&err.to_string())?),
        }
    }

    fn save(&self, expenses: &[Expense]) -> Result<()> {
        let json = serde_json::to_string_pretty(expenses)?;
        replace_file(&self.path, &json)?;
        debug!(path = %self.path.display(), count = expenses.len(), "saved expenses");
        Ok(())
    }
}

/// Integrity problems that do not prevent loading but deserve a log line.
pub fn collection_warnings(expenses: &[Expense]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for expense in expenses {
        if !seen.insert(expense.id) {
            warnings.push(format!("expense id {} appears more than once", expense.id));
        }
        if parse_date(&expense.date).is_none() {
            warnings.push(format!(
                "expense {} has unparseable date `{}`",
                expense.id, expense.date
            ));
        }
        if !valid_amount(expense.amount) {
            warnings.push(format!(
                "expense {} has invalid amount {}",
                expense.id, expense.amount
            ));
        }
    }
    warnings
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn replace_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
