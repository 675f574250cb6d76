use crate::color::{Color, ColorMap};
use crate::model::ShiftTypeDefinition;
use crate::store::ScheduleStore;
use chrono::NaiveDate;
use serde::Serialize;

/// Événement transmis au composant calendrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub all_day: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

pub fn calendar_events(store: &ScheduleStore, colors: &ColorMap) -> Vec<CalendarEvent> {
    store
        .all()
        .map(|entry| CalendarEvent {
            color: colors.get(&entry.shift_type),
            title: entry.shift_type,
            start: entry.date,
            end: entry.date,
            all_day: true,
        })
        .collect()
}

/// Mise en évidence d'une case du mois.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayMarker {
    Active,
    Today,
    Plain,
}

/// Le jour actif l'emporte sur aujourd'hui.
pub fn day_marker(date: NaiveDate, active: Option<NaiveDate>, today: NaiveDate) -> DayMarker {
    if active == Some(date) {
        DayMarker::Active
    } else if date == today {
        DayMarker::Today
    } else {
        DayMarker::Plain
    }
}

pub fn picker_label(position: usize, def: &ShiftTypeDefinition) -> String {
    let mut label = format!(
        "{position} - {} ({} - {})",
        def.shift_type, def.start_time, def.end_time
    );
    if def.all_day_event {
        label.push_str(" (All Day)");
    }
    label
}

pub fn picker_prompt(date: NaiveDate) -> String {
    format!("Select the shift for {}", date.format("%Y-%m-%d"))
}
