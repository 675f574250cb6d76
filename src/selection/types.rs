use crate::model::ScheduleEntry;
use chrono::NaiveDate;
use thiserror::Error;

/// État de la saisie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Nouveau jour ; avance au lendemain après chaque choix.
    Creating { date: NaiveDate },
    /// Jour déjà planifié ; `index` = rang de l'entrée dans le planning.
    Editing { date: NaiveDate, index: usize },
}

impl SelectionState {
    pub fn active_date(&self) -> Option<NaiveDate> {
        match *self {
            Self::Idle => None,
            Self::Creating { date } | Self::Editing { date, .. } => Some(date),
        }
    }

    pub fn is_selecting(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Touche reçue par le contrôleur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Enter,
    Other(char),
}

/// Effet d'une touche.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Assigned(ScheduleEntry),
    /// `Enter` : l'appelant déclenche l'export, quel que soit l'état.
    ExportRequested,
    Ignored,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("no day selected")]
    NotSelecting,
    #[error("unknown shift type: {0}")]
    UnknownShiftType(String),
}
