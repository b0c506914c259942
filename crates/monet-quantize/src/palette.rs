//! The output of every quantizer: representative colors with the number of
//! pixels each one stands for.

use std::collections::HashMap;

use monet_hct::Argb;

/// Colors and their pixel populations.
///
/// Each color appears once. Iteration order is the order the producing
/// quantizer emitted its clusters in, so results are reproducible run to
/// run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantizedPalette {
    entries: Vec<(Argb, u32)>,
}

impl QuantizedPalette {
    /// Build from `(color, population)` pairs. Repeated colors are merged
    /// and their populations summed; the first occurrence fixes the
    /// position.
    #[must_use]
    pub fn from_entries(pairs: impl IntoIterator<Item = (Argb, u32)>) -> Self {
        let mut entries: Vec<(Argb, u32)> = Vec::new();
        let mut positions: HashMap<Argb, usize> = HashMap::new();
        for (color, count) in pairs {
            if let Some(&i) = positions.get(&color) {
                entries[i].1 = entries[i].1.saturating_add(count);
            } else {
                positions.insert(color, entries.len());
                entries.push((color, count));
            }
        }
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Population of `color`, if it is one of the clusters.
    #[must_use]
    pub fn get(&self, color: Argb) -> Option<u32> {
        self.entries.iter().find(|(c, _)| *c == color).map(|&(_, n)| n)
    }

    /// Sum of all populations.
    #[must_use]
    pub fn total_population(&self) -> u64 {
        self.entries.iter().map(|&(_, n)| u64::from(n)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Argb, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn colors(&self) -> impl Iterator<Item = Argb> + '_ {
        self.entries.iter().map(|&(c, _)| c)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(Argb, u32)] {
        &self.entries
    }
}

impl FromIterator<(Argb, u32)> for QuantizedPalette {
    fn from_iter<I: IntoIterator<Item = (Argb, u32)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl IntoIterator for QuantizedPalette {
    type Item = (Argb, u32);
    type IntoIter = std::vec::IntoIter<(Argb, u32)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
