use crate::model::ShiftCatalog;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Couleur RGB, affichée `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Source d'aléa pour les couleurs ; injectable pour des tests déterministes.
pub trait ColorSource {
    fn next_rgb(&mut self) -> [u8; 3];
}

/// Source par défaut : octets aléatoires d'un UUID v4, non reproductible.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidColorSource;

impl ColorSource for UuidColorSource {
    fn next_rgb(&mut self) -> [u8; 3] {
        // les octets 0..6 d'un v4 sont entièrement aléatoires
        let bytes = Uuid::new_v4().into_bytes();
        [bytes[0], bytes[1], bytes[2]]
    }
}

/// Couleur par type de turno, figée au démarrage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColorMap {
    colors: HashMap<String, Color>,
}

impl ColorMap {
    pub fn get(&self, shift_type: &str) -> Option<Color> {
        self.colors.get(shift_type).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Tire une couleur par type du catalogue, dans l'ordre du catalogue.
pub fn assign_colors(catalog: &ShiftCatalog, source: &mut dyn ColorSource) -> ColorMap {
    let colors = catalog
        .iter()
        .map(|def| (def.shift_type.clone(), Color(source.next_rgb())))
        .collect();
    ColorMap { colors }
}
