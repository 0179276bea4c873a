use std::collections::HashMap;

use crate::document::{ParseError, TokenCounts};
use crate::types::identifiers::TupleOrder;

// Scoped to one scoring call:
// never cloned
// never shared between calls or threads
// no invalidation
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: HashMap<TupleOrder, TokenCounts>,
    parses: usize,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the counts for `order`, running `parse` only if this order has
    /// not been seen yet in this cache.
    pub fn get_or_parse<F>(&mut self, order: TupleOrder, parse: F) -> Result<&TokenCounts, ParseError>
    where
        F: FnOnce(TupleOrder) -> Result<TokenCounts, ParseError>,
    {
        use std::collections::hash_map::Entry;

        match self.entries.entry(order) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let counts = parse(order)?;
                self.parses += 1;
                Ok(entry.insert(counts))
            }
        }
    }

    pub fn contains(&self, order: TupleOrder) -> bool {
        self.entries.contains_key(&order)
    }

    /// Number of parses performed so far.
    pub fn parses(&self) -> usize {
        self.parses
    }
}
