use crate::color::{assign_colors, ColorMap, ColorSource};
use crate::export::{export_csv, DownloadSink, ExportError, ExportSummary};
use crate::model::ShiftCatalog;
use crate::selection::{Key, KeyOutcome, SelectionController, SelectionState};
use crate::view::{calendar_events, day_marker, picker_label, picker_prompt, DayMarker};
use chrono::NaiveDate;
use std::fmt::Write as _;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Geste utilisateur, une ligne de script par commande.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Clic sur une case vide.
    Slot(NaiveDate),
    /// Clic sur un turno affiché.
    Event(NaiveDate),
    Pick(String),
    Key(Key),
    Cancel,
    Delete,
    Reset,
    Export,
    Show,
    Events,
    Colors,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let date = |cmd: &'static str| -> Result<NaiveDate, CommandError> {
            if arg.is_empty() {
                return Err(CommandError::MissingArgument(cmd));
            }
            NaiveDate::parse_from_str(arg, "%Y-%m-%d")
                .map_err(|_| CommandError::InvalidDate(arg.to_string()))
        };
        match name.to_ascii_lowercase().as_str() {
            "slot" => Ok(Command::Slot(date("slot")?)),
            "event" => Ok(Command::Event(date("event")?)),
            "pick" if arg.is_empty() => Err(CommandError::MissingArgument("pick")),
            "pick" => Ok(Command::Pick(arg.to_string())),
            "key" if arg.is_empty() => Err(CommandError::MissingArgument("key")),
            "key" => Ok(Command::Key(Key::from_name(arg))),
            "cancel" => Ok(Command::Cancel),
            "delete" => Ok(Command::Delete),
            "reset" => Ok(Command::Reset),
            "export" => Ok(Command::Export),
            "show" => Ok(Command::Show),
            "events" => Ok(Command::Events),
            "colors" => Ok(Command::Colors),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("rendering calendar events: {0}")]
    Json(#[from] serde_json::Error),
}

/// Réponse à afficher ; `None` pour les gestes silencieux.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    None,
    Exported(ExportSummary),
    Text(String),
}

/// Boucle d'événements : contrôleur, couleurs et collaborateur de téléchargement.
pub struct Session<S: DownloadSink> {
    controller: SelectionController,
    colors: ColorMap,
    sink: S,
    today: NaiveDate,
}

impl<S: DownloadSink> Session<S> {
    pub fn new(
        catalog: ShiftCatalog,
        source: &mut dyn ColorSource,
        sink: S,
        today: NaiveDate,
    ) -> Self {
        let colors = assign_colors(&catalog, source);
        Self {
            controller: SelectionController::new(catalog),
            colors,
            sink,
            today,
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SelectionController {
        &mut self.controller
    }

    pub fn colors(&self) -> &ColorMap {
        &self.colors
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn apply(&mut self, cmd: Command) -> Result<Reply, SessionError> {
        match cmd {
            Command::Slot(date) => self.controller.select_empty_day(date),
            Command::Event(date) => self.controller.select_day_with_entry(date),
            Command::Pick(shift_type) => {
                if let Err(err) = self.controller.choose_shift_type(&shift_type) {
                    warn!(%err, "pick ignored");
                }
            }
            Command::Key(key) => match self.controller.handle_key(key) {
                KeyOutcome::ExportRequested => return self.export(),
                KeyOutcome::Assigned(entry) => {
                    debug!(date = %entry.date, shift_type = %entry.shift_type, "assigned by key")
                }
                KeyOutcome::Ignored => debug!(?key, "key ignored"),
            },
            Command::Cancel => self.controller.cancel(),
            Command::Delete => {
                if self.controller.delete_active_day().is_none() {
                    debug!("nothing to delete");
                }
            }
            Command::Reset => self.controller.reset(),
            Command::Export => return self.export(),
            Command::Show => return Ok(Reply::Text(self.render_status())),
            Command::Events => {
                let events = calendar_events(self.controller.store(), &self.colors);
                return Ok(Reply::Text(serde_json::to_string_pretty(&events)?));
            }
            Command::Colors => return Ok(Reply::Text(self.render_picker())),
        }
        Ok(Reply::None)
    }

    fn export(&mut self) -> Result<Reply, SessionError> {
        let summary = export_csv(
            self.controller.store(),
            self.controller.catalog(),
            &mut self.sink,
        )?;
        Ok(Reply::Exported(summary))
    }

    /// Libellés du sélecteur, avec la couleur de chaque type.
    pub fn render_picker(&self) -> String {
        let mut out = String::new();
        for (idx, def) in self.controller.catalog().iter().enumerate() {
            let color = self
                .colors
                .get(&def.shift_type)
                .map(|c| c.to_string())
                .unwrap_or_default();
            let _ = writeln!(out, "{color} {}", picker_label(idx + 1, def));
        }
        out
    }

    /// État courant et planning, une entrée par ligne.
    pub fn render_status(&self) -> String {
        let mut out = String::new();
        match self.controller.state() {
            SelectionState::Idle => out.push_str("idle\n"),
            SelectionState::Creating { date } => {
                let _ = writeln!(out, "creating | {}", picker_prompt(date));
            }
            SelectionState::Editing { date, .. } => {
                let _ = writeln!(out, "editing | {}", picker_prompt(date));
            }
        }
        let active = self.controller.active_date();
        for entry in self.controller.store().all() {
            let marker = match day_marker(entry.date, active, self.today) {
                DayMarker::Active => "*",
                DayMarker::Today => "!",
                DayMarker::Plain => " ",
            };
            let _ = writeln!(out, "{marker} {} {}", entry.date, entry.shift_type);
        }
        out
    }
}
