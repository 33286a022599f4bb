//! Ordered palettes and the set of pinned positions.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ordered sequence of colors, replaced wholesale on each generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }

    pub fn first(&self) -> Option<&Color> {
        self.colors.first()
    }

    pub fn last(&self) -> Option<&Color> {
        self.colors.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Color> {
        self.colors.iter()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<Color> {
        self.colors
    }

    /// Puts `color` at position 0, replacing what was there. An empty
    /// palette grows to hold it.
    pub fn set_first(&mut self, color: Color) {
        match self.colors.first_mut() {
            Some(slot) => *slot = color,
            None => self.colors.push(color),
        }
    }

    /// Prepends `colors` and keeps at most `limit` entries.
    pub fn prepend(&mut self, colors: Vec<Color>, limit: usize) {
        let mut merged = colors;
        merged.append(&mut self.colors);
        merged.truncate(limit);
        self.colors = merged;
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self::new(colors)
    }
}

impl FromIterator<Color> for Palette {
    fn from_iter<I: IntoIterator<Item = Color>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Color;
    type IntoIter = std::slice::Iter<'a, Color>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Positions pinned across regeneration.
///
/// Positions are not checked against any palette length: a lock past the
/// end simply has no effect until the palette grows to reach it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockSet {
    positions: BTreeSet<usize>,
}

impl LockSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the lock on `index`. Returns `true` if it is now locked.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.positions.remove(&index) {
            false
        } else {
            self.positions.insert(index);
            true
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.positions.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Locked positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions.iter().copied()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }
}

impl FromIterator<usize> for LockSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
