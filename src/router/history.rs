use super::Location;

/// Session history of committed locations.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Location>,
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn current(&self) -> Option<&Location> {
        self.cursor.and_then(|index| self.entries.get(index))
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    /// Append after the current entry, dropping any forward entries.
    pub fn push(&mut self, location: Location) {
        let keep = self.cursor.map_or(0, |index| index + 1);
        self.entries.truncate(keep);
        self.entries.push(location);
        self.cursor = Some(self.entries.len() - 1);
    }

    /// Overwrite the current entry, or push when the history is empty.
    pub fn replace(&mut self, location: Location) {
        match self.cursor {
            Some(index) => self.entries[index] = location,
            None => self.push(location),
        }
    }

    pub fn back_index(&self) -> Option<usize> {
        self.cursor.and_then(|index| index.checked_sub(1))
    }

    pub fn forward_index(&self) -> Option<usize> {
        self.cursor
            .map(|index| index + 1)
            .filter(|next| *next < self.entries.len())
    }

    pub fn get(&self, index: usize) -> Option<&Location> {
        self.entries.get(index)
    }

    /// Move the cursor to `index`, recording where the navigation actually landed.
    pub(crate) fn traverse(&mut self, index: usize, location: Location) {
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = location;
            self.cursor = Some(index);
        } else {
            self.push(location);
        }
    }
}
