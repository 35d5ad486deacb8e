//! Opening identification by longest known prefix of the move history.

mod table;

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Separator between SAN moves in a table key.
pub const MOVE_SEPARATOR: &str = " ";

/// Opening metadata attached to a move sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningEntry {
    pub name: String,
    pub eco: String,
    pub description: String,
}

/// Immutable table from canonical move sequences to openings.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<String, OpeningEntry>,
}

static STANDARD_BOOK: LazyLock<OpeningBook> = LazyLock::new(|| {
    OpeningBook::from_entries(table::ENTRIES.iter().map(|&(moves, eco, name, description)| {
        (
            moves.to_string(),
            OpeningEntry {
                name: name.to_string(),
                eco: eco.to_string(),
                description: description.to_string(),
            },
        )
    }))
});

impl OpeningBook {
    /// The built-in ECO table, loaded once per process.
    pub fn standard() -> &'static OpeningBook {
        &STANDARD_BOOK
    }

    /// Build a book from `(key, entry)` pairs. Keys are SAN moves joined by
    /// [`MOVE_SEPARATOR`]; a repeated key keeps the last entry.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, OpeningEntry)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact probe for one canonical key.
    pub fn get(&self, key: &str) -> Option<&OpeningEntry> {
        self.entries.get(key)
    }

    /// Entry keyed by the longest prefix of `moves` present in the book.
    ///
    /// Probes from the full sequence down to the first move; `None` when no
    /// prefix is known (including an empty history).
    pub fn lookup<S: AsRef<str>>(&self, moves: &[S]) -> Option<&OpeningEntry> {
        (1..=moves.len()).rev().find_map(|len| {
            let key = moves[..len]
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(MOVE_SEPARATOR);
            self.entries.get(&key)
        })
    }
}

/// Look `moves` up in the standard book.
pub fn match_opening<S: AsRef<str>>(moves: &[S]) -> Option<&'static OpeningEntry> {
    OpeningBook::standard().lookup(moves)
}
