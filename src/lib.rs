#![forbid(unsafe_code)]
//! Shift CSV — saisie de turni jour par jour et export CSV pour calendrier.
//!
//! - Catalogue de types de turno (JSON/CSV), validé au chargement.
//! - Planning en mémoire, une entrée par date.
//! - Machine à états de sélection (création / édition / raccourcis clavier).
//! - Export CSV `shifts.csv` importable dans les calendriers courants.

pub mod color;
pub mod export;
pub mod io;
pub mod model;
pub mod selection;
pub mod session;
pub mod store;
pub mod view;

pub use color::{assign_colors, Color, ColorMap, ColorSource, UuidColorSource};
pub use export::{
    export_csv, render_csv, DirectorySink, DownloadSink, ExportError, ExportSummary, MemorySink,
    CSV_HEADER, EXPORT_FILENAME, EXPORT_MIME_TYPE,
};
pub use model::{CatalogError, ScheduleEntry, ShiftCatalog, ShiftTypeDefinition};
pub use selection::{Key, KeyOutcome, SelectError, SelectionController, SelectionState};
pub use session::{Command, CommandError, Reply, Session, SessionError};
pub use store::ScheduleStore;
pub use view::{calendar_events, day_marker, picker_label, CalendarEvent, DayMarker};
