use crate::model::ScheduleEntry;
use chrono::NaiveDate;
use std::collections::btree_map::{self, BTreeMap};

/// Planning en mémoire : au plus une entrée par date.
///
/// Indexé par date, l'unicité est structurelle ; l'itération suit l'ordre
/// chronologique, stable entre deux appels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    entries: BTreeMap<NaiveDate, String>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insère ou remplace ; renvoie le type précédent le cas échéant.
    pub fn upsert<S: Into<String>>(&mut self, date: NaiveDate, shift_type: S) -> Option<String> {
        self.entries.insert(date, shift_type.into())
    }

    /// No-op si la date est absente.
    pub fn remove(&mut self, date: NaiveDate) -> Option<String> {
        self.entries.remove(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.entries.get(&date).map(String::as_str)
    }

    /// Rang de l'entrée dans l'ordre d'itération.
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        if !self.entries.contains_key(&date) {
            return None;
        }
        Some(self.entries.range(..date).count())
    }

    pub fn all(&self) -> Entries<'_> {
        Entries {
            inner: self.entries.iter(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<ScheduleEntry> for ScheduleStore {
    fn extend<I: IntoIterator<Item = ScheduleEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.entries.insert(entry.date, entry.shift_type);
        }
    }
}

impl FromIterator<ScheduleEntry> for ScheduleStore {
    fn from_iter<I: IntoIterator<Item = ScheduleEntry>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

/// Itérateur paresseux sur les entrées ; `Clone` pour le relancer.
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    inner: btree_map::Iter<'a, NaiveDate, String>,
}

impl Iterator for Entries<'_> {
    type Item = ScheduleEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(date, shift_type)| ScheduleEntry::new(*date, shift_type.clone()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Entries<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn upsert_keeps_last_value_per_date() {
        let mut store = ScheduleStore::new();
        store.upsert(day(2), "Pomeriggio");
        store.upsert(day(1), "Mattina");
        let prev = store.upsert(day(2), "Notte");

        assert_eq!(prev.as_deref(), Some("Pomeriggio"));
        let all: Vec<_> = store.all().collect();
        assert_eq!(
            all,
            vec![
                ScheduleEntry::new(day(1), "Mattina"),
                ScheduleEntry::new(day(2), "Notte"),
            ]
        );
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut store = ScheduleStore::new();
        store.upsert(day(1), "Mattina");
        assert!(store.remove(day(5)).is_none());
        assert_eq!(store.len(), 1);
        store.remove(day(1));
        assert!(store.all().all(|e| e.date != day(1)));
    }

    #[test]
    fn all_is_restartable() {
        let store: ScheduleStore = [
            ScheduleEntry::new(day(3), "A"),
            ScheduleEntry::new(day(1), "B"),
        ]
        .into_iter()
        .collect();
        let it = store.all();
        assert_eq!(it.clone().count(), 2);
        assert_eq!(it.map(|e| e.date).collect::<Vec<_>>(), vec![day(1), day(3)]);
    }

    #[test]
    fn position_follows_iteration_order() {
        let mut store = ScheduleStore::new();
        store.upsert(day(10), "A");
        store.upsert(day(4), "B");
        assert_eq!(store.position(day(4)), Some(0));
        assert_eq!(store.position(day(10)), Some(1));
        assert_eq!(store.position(day(7)), None);
    }
}
