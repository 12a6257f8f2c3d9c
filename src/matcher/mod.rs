pub mod domain;
mod ip;

pub use domain::DomainTrie;
pub use ip::{Ipv4Trie, Ipv6Trie, PrefixTrie};

use crate::error::Result;
use crate::parser::Address;

/// Trait for pattern tables with longest-match lookup
pub trait Matcher<V> {
    /// Store `value` under `pattern`, replacing any previous value
    fn insert(&mut self, pattern: &str, value: V) -> Result<()>;

    /// Find the most specific value matching `query`
    fn lookup(&self, query: &str) -> Result<Option<&V>>;
}

impl<A: Address, V> Matcher<V> for PrefixTrie<A, V> {
    fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        PrefixTrie::insert(self, pattern, value)
    }

    fn lookup(&self, query: &str) -> Result<Option<&V>> {
        self.find(query)
    }
}

impl<V: Clone> Matcher<V> for DomainTrie<V> {
    fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        DomainTrie::insert(self, pattern, value)
    }

    fn lookup(&self, query: &str) -> Result<Option<&V>> {
        Ok(self.find(query))
    }
}
