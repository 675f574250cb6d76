mod keys;
mod types;

pub use types::{Key, KeyOutcome, SelectError, SelectionState};

use crate::model::{ScheduleEntry, ShiftCatalog};
use crate::store::ScheduleStore;
use chrono::NaiveDate;
use tracing::debug;

/// Contrôleur de saisie : seul point de mutation du planning.
#[derive(Debug, Clone)]
pub struct SelectionController {
    catalog: ShiftCatalog,
    store: ScheduleStore,
    state: SelectionState,
}

impl SelectionController {
    pub fn new(catalog: ShiftCatalog) -> Self {
        Self::with_store(catalog, ScheduleStore::new())
    }

    pub fn with_store(catalog: ShiftCatalog, store: ScheduleStore) -> Self {
        Self {
            catalog,
            store,
            state: SelectionState::Idle,
        }
    }

    pub fn catalog(&self) -> &ShiftCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn active_date(&self) -> Option<NaiveDate> {
        self.state.active_date()
    }

    /// Clic sur une case vide : passe en création pour `date`.
    pub fn select_empty_day(&mut self, date: NaiveDate) {
        self.transition(SelectionState::Creating { date });
    }

    /// Clic sur un turno existant ; se comporte comme une case vide si la
    /// date n'a pas d'entrée.
    pub fn select_day_with_entry(&mut self, date: NaiveDate) {
        match self.store.position(date) {
            Some(index) => self.transition(SelectionState::Editing { date, index }),
            None => self.select_empty_day(date),
        }
    }

    /// Affecte `shift_type` au jour actif.
    ///
    /// En création, le jour actif avance au lendemain ; en édition, retour
    /// à `Idle`. Un type absent du catalogue est refusé sans mutation.
    pub fn choose_shift_type(&mut self, shift_type: &str) -> Result<ScheduleEntry, SelectError> {
        let date = self.state.active_date().ok_or(SelectError::NotSelecting)?;
        if !self.catalog.contains(shift_type) {
            return Err(SelectError::UnknownShiftType(shift_type.to_string()));
        }

        self.store.upsert(date, shift_type);
        let next = match self.state {
            SelectionState::Creating { .. } => match date.succ_opt() {
                Some(date) => SelectionState::Creating { date },
                None => SelectionState::Idle,
            },
            _ => SelectionState::Idle,
        };
        self.transition(next);
        Ok(ScheduleEntry::new(date, shift_type))
    }

    /// Raccourci clavier : chiffre `n` = n-ième type du catalogue, `Enter` = export.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter => KeyOutcome::ExportRequested,
            Key::Digit(digit) if self.state.is_selecting() => {
                let Some(def) = keys::digit_position(digit, self.catalog.len())
                    .and_then(|n| self.catalog.by_position(n))
                else {
                    debug!(digit, "digit out of catalog range, ignored");
                    return KeyOutcome::Ignored;
                };
                let shift_type = def.shift_type.clone();
                match self.choose_shift_type(&shift_type) {
                    Ok(entry) => KeyOutcome::Assigned(entry),
                    Err(_) => KeyOutcome::Ignored,
                }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Abandonne la sélection sans toucher au planning.
    pub fn cancel(&mut self) {
        if self.state.is_selecting() {
            self.transition(SelectionState::Idle);
        }
    }

    /// Supprime l'entrée du jour actif (no-op si absente) puis retour à `Idle`.
    pub fn delete_active_day(&mut self) -> Option<ScheduleEntry> {
        let date = self.state.active_date()?;
        let removed = self
            .store
            .remove(date)
            .map(|shift_type| ScheduleEntry::new(date, shift_type));
        self.transition(SelectionState::Idle);
        removed
    }

    /// Vide tout le planning, depuis n'importe quel état.
    pub fn reset(&mut self) {
        self.store.clear();
        self.transition(SelectionState::Idle);
    }

    /// Remplace le planning par des entrées importées.
    pub fn load_entries<I: IntoIterator<Item = ScheduleEntry>>(&mut self, entries: I) {
        self.store = entries.into_iter().collect();
        self.transition(SelectionState::Idle);
    }

    fn transition(&mut self, next: SelectionState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "selection transition");
        }
        self.state = next;
    }
}
