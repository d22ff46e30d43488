//! Lookup results and index resolution.
//!
//! A search produces a [`LookupCache`]: a dense, bounded list of recipes in
//! discovery order. The session keeps the most recent one in a
//! [`LookupState`], and later commands use it to turn a short index typed by
//! the user back into a recipe id.

use crate::error::{LookupError, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Name under which the lookup state is exported by the `state` command.
pub const LOOKUP_STATE_NAME: &str = "_lookup";

/// Titles longer than this many characters get one more `...` per multiple.
const ELLIPSIS_STEP: usize = 49;

/// A recipe identifier on the recipe host. Always a non-empty run of digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Accept `raw` if it is a non-empty string of ASCII digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_owned()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupEntry {
    #[serde(skip)]
    pub index: usize,
    pub title: String,
    pub id: RecipeId,
}

impl LookupEntry {
    /// Render as a listing line: `index: title ...`
    pub fn display_line(&self) -> String {
        let dots = "...".repeat(self.title.chars().count() / ELLIPSIS_STEP);
        if dots.is_empty() {
            format!("{}: {}", self.index, self.title)
        } else {
            format!("{}: {} {}", self.index, self.title, dots)
        }
    }
}

/// Result set of one search. Indices are dense from 0 and never exceed the
/// bound the cache was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCache {
    entries: Vec<LookupEntry>,
    limit: usize,
}

impl LookupCache {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Append a recipe, assigning the next index. Returns false once the
    /// cache is full.
    pub fn push(&mut self, id: RecipeId, title: String) -> bool {
        if self.is_full() {
            return false;
        }
        let index = self.entries.len();
        self.entries.push(LookupEntry { index, title, id });
        true
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn get(&self, index: usize) -> Option<&LookupEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LookupCache {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.index.to_string(), entry)?;
        }
        map.end()
    }
}

/// What a user token refers to once resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// `#n`, always an index
    MarkedIndex(usize),
    /// bare number below the result bound
    Index(usize),
    /// bare number at or above the result bound
    Id(RecipeId),
}

/// Classify a token without looking at any cache.
pub fn classify(token: &str, max_results: usize) -> Result<TokenKind> {
    let token = token.trim();

    if let Some(rest) = token.strip_prefix('#') {
        return rest
            .trim()
            .parse::<usize>()
            .map(TokenKind::MarkedIndex)
            .map_err(|_| LookupError::not_found(token, "not a lookup index"));
    }

    match RecipeId::parse(token) {
        Some(id) => match token.parse::<usize>() {
            Ok(n) if n < max_results => Ok(TokenKind::Index(n)),
            _ => Ok(TokenKind::Id(id)),
        },
        None => Err(LookupError::not_found(token, "not a lookup index or recipe id")),
    }
}

/// The session's memory of its most recent search.
#[derive(Debug, Clone, Default)]
pub struct LookupState {
    last: Option<LookupCache>,
}

impl LookupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the previous result set wholesale.
    pub fn replace(&mut self, cache: LookupCache) {
        self.last = Some(cache);
    }

    /// `None` until the first successful search.
    pub fn cache(&self) -> Option<&LookupCache> {
        self.last.as_ref()
    }

    /// Turn a user token into a recipe id.
    ///
    /// Indices are checked against the live cache: an index the cache does
    /// not hold is an error rather than being passed on as an id.
    pub fn resolve(&self, token: &str, max_results: usize) -> Result<RecipeId> {
        let token = token.trim();
        let index = match classify(token, max_results)? {
            TokenKind::Id(id) => return Ok(id),
            TokenKind::Index(n) | TokenKind::MarkedIndex(n) => n,
        };

        let cache = self
            .last
            .as_ref()
            .ok_or_else(|| LookupError::not_found(token, "no lookup results yet, run search first"))?;

        cache.get(index).map(|e| e.id.clone()).ok_or_else(|| {
            LookupError::not_found(
                token,
                format!("last lookup has {} result(s)", cache.len()),
            )
        })
    }
}
