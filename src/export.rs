use crate::model::ShiftCatalog;
use crate::store::ScheduleStore;
use anyhow::Context;
use csv::{Terminator, WriterBuilder};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

pub const EXPORT_FILENAME: &str = "shifts.csv";
pub const EXPORT_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// En-tête attendu par les imports CSV des calendriers courants.
pub const CSV_HEADER: [&str; 9] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "All Day Event",
    "Description",
    "Location",
    "Private",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("download failed: {0}")]
    Download(#[source] anyhow::Error),
}

/// Résultat d'un export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows: usize,
    /// Entrées ignorées car leur type n'est pas au catalogue.
    pub skipped: usize,
}

/// Collaborateur « enregistrer sous » : reçoit le contenu final.
pub trait DownloadSink {
    fn save(&mut self, content: &[u8], filename: &str, mime_type: &str) -> anyhow::Result<()>;
}

/// Écrit les téléchargements dans un répertoire, de manière atomique.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl DownloadSink for DirectorySink {
    fn save(&mut self, content: &[u8], filename: &str, _mime_type: &str) -> anyhow::Result<()> {
        let target = self.path_for(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("creating temp file in {}", self.dir.display()))?;
        tmp.write_all(content)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target)
            .with_context(|| format!("atomic rename to {}", target.display()))?;
        Ok(())
    }
}

/// Téléchargement capturé par [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub content: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

/// Garde les téléchargements en mémoire (tests, intégrations).
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub downloads: Vec<Download>,
}

impl MemorySink {
    pub fn last(&self) -> Option<&Download> {
        self.downloads.last()
    }
}

impl DownloadSink for MemorySink {
    fn save(&mut self, content: &[u8], filename: &str, mime_type: &str) -> anyhow::Result<()> {
        self.downloads.push(Download {
            content: content.to_vec(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
        });
        Ok(())
    }
}

/// Sérialise le planning en CSV « calendrier ».
///
/// Une ligne par entrée dont le type est connu du catalogue ; les autres
/// sont ignorées. Les champs ne sont cités que s'ils contiennent un
/// séparateur, un guillemet ou un saut de ligne.
pub fn render_csv(
    store: &ScheduleStore,
    catalog: &ShiftCatalog,
) -> Result<(String, ExportSummary), ExportError> {
    let mut buf = Vec::new();
    let mut summary = ExportSummary {
        rows: 0,
        skipped: 0,
    };
    {
        let mut w = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        w.write_record(CSV_HEADER)?;
        for entry in store.all() {
            let Some(def) = catalog.find(&entry.shift_type) else {
                debug!(date = %entry.date, shift_type = %entry.shift_type, "unknown shift type, row skipped");
                summary.skipped += 1;
                continue;
            };
            let date = entry.date.format(DATE_FORMAT).to_string();
            w.write_record([
                entry.shift_type.as_str(),
                date.as_str(),
                def.start_time.as_str(),
                date.as_str(),
                def.end_time.as_str(),
                bool_field(def.all_day_event),
                "",
                "",
                "False",
            ])?;
            summary.rows += 1;
        }
        w.flush()?;
    }
    Ok((String::from_utf8(buf)?, summary))
}

/// Produit le CSV et le remet au collaborateur de téléchargement.
pub fn export_csv(
    store: &ScheduleStore,
    catalog: &ShiftCatalog,
    sink: &mut dyn DownloadSink,
) -> Result<ExportSummary, ExportError> {
    let (content, summary) = render_csv(store, catalog)?;
    sink.save(content.as_bytes(), EXPORT_FILENAME, EXPORT_MIME_TYPE)
        .map_err(ExportError::Download)?;
    debug!(rows = summary.rows, skipped = summary.skipped, "csv exported");
    Ok(summary)
}

fn bool_field(flag: bool) -> &'static str {
    if flag {
        "True"
    } else {
        "False"
    }
}
