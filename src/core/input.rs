//! Parsing of the free-text card arguments given to wishlist commands.
//!
//! Arguments are comma-separated: either a bare card name (`Charizard`) or the full
//! `name, set, id` triple (`Charizard, Base, base1-4`). Segments are trimmed and
//! compared verbatim later on; no case folding happens here.

use std::fmt;

/// The three user-supplied fields that identify one card printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTuple {
    /// Card name as typed by the user
    pub card_name: String,
    /// Print set name as typed by the user
    pub set_name: String,
    /// Catalog id as typed by the user
    pub card_id: String,
}

impl fmt::Display for CardTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Set: {}, ID: {})",
            self.card_name, self.set_name, self.card_id
        )
    }
}

/// What an `add_wishlist` argument asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardQuery {
    /// Only a name: the bot suggests a concrete printing instead of adding anything
    NameOnly(String),
    /// A full triple to match against the catalog and add
    Exact(CardTuple),
}

/// Rejected argument text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Wrong number of comma-separated segments (or an empty argument)
    InvalidFormat {
        /// How many segments were found
        segments: usize,
    },
}

fn split_segments(raw: &str) -> Vec<String> {
    raw.split(',').map(|part| part.trim().to_string()).collect()
}

/// Parses an `add_wishlist` argument into a [`CardQuery`].
///
/// # Errors
/// Returns [`InputError::InvalidFormat`] unless there are exactly 1 or 3 segments,
/// or when the single segment is empty.
pub fn parse_card_query(raw: &str) -> Result<CardQuery, InputError> {
    let mut parts = split_segments(raw);
    match parts.len() {
        1 if parts[0].is_empty() => Err(InputError::InvalidFormat { segments: 0 }),
        1 => Ok(CardQuery::NameOnly(parts.remove(0))),
        3 => into_tuple(parts).map(CardQuery::Exact),
        segments => Err(InputError::InvalidFormat { segments }),
    }
}

/// Parses a `remove_wishlist` argument, which must be the full triple.
///
/// # Errors
/// Returns [`InputError::InvalidFormat`] unless there are exactly 3 segments.
pub fn parse_card_tuple(raw: &str) -> Result<CardTuple, InputError> {
    let parts = split_segments(raw);
    if parts.len() != 3 {
        return Err(InputError::InvalidFormat {
            segments: parts.len(),
        });
    }
    into_tuple(parts)
}

fn into_tuple(parts: Vec<String>) -> Result<CardTuple, InputError> {
    let segments = parts.len();
    let mut parts = parts.into_iter();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(card_name), Some(set_name), Some(card_id)) => Ok(CardTuple {
            card_name,
            set_name,
            card_id,
        }),
        _ => Err(InputError::InvalidFormat { segments }),
    }
}
