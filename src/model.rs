use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Définition d'un type de turno (gabarit horaire sélectionnable pour un jour).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTypeDefinition {
    #[serde(rename = "type")]
    pub shift_type: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub all_day_event: bool,
}

impl ShiftTypeDefinition {
    pub fn new<T, S, E>(shift_type: T, start_time: S, end_time: E, all_day_event: bool) -> Self
    where
        T: Into<String>,
        S: Into<String>,
        E: Into<String>,
    {
        Self {
            shift_type: shift_type.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            all_day_event,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("shift type at position {0} has an empty name")]
    EmptyType(usize),
    #[error("duplicate shift type: {0}")]
    DuplicateType(String),
}

/// Catalogue immuable des types de turno, dans l'ordre de la source.
///
/// L'ordre compte : il définit les positions 1-based des raccourcis clavier
/// et des libellés du sélecteur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShiftCatalog {
    definitions: Vec<ShiftTypeDefinition>,
}

impl ShiftCatalog {
    /// Valide les définitions : noms non vides et uniques.
    pub fn new(definitions: Vec<ShiftTypeDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (idx, def) in definitions.iter().enumerate() {
            if def.shift_type.trim().is_empty() {
                return Err(CatalogError::EmptyType(idx + 1));
            }
            if !seen.insert(def.shift_type.as_str()) {
                return Err(CatalogError::DuplicateType(def.shift_type.clone()));
            }
        }
        Ok(Self { definitions })
    }

    pub fn find(&self, shift_type: &str) -> Option<&ShiftTypeDefinition> {
        self.definitions.iter().find(|d| d.shift_type == shift_type)
    }

    pub fn contains(&self, shift_type: &str) -> bool {
        self.find(shift_type).is_some()
    }

    /// Définition à la position `n` (1-based), comme sur les touches numériques.
    pub fn by_position(&self, n: usize) -> Option<&ShiftTypeDefinition> {
        n.checked_sub(1).and_then(|idx| self.definitions.get(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShiftTypeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl<'a> IntoIterator for &'a ShiftCatalog {
    type Item = &'a ShiftTypeDefinition;
    type IntoIter = std::slice::Iter<'a, ShiftTypeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Affectation d'un type de turno à une date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub shift_type: String,
}

impl ScheduleEntry {
    pub fn new<S: Into<String>>(date: NaiveDate, shift_type: S) -> Self {
        Self {
            date,
            shift_type: shift_type.into(),
        }
    }
}
