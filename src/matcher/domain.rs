//! Wildcard domain matching.
//!
//! Domains are matched through two structures:
//! - an exact table keyed by the full domain, checked first
//! - a label trie keyed by reversed labels (`com` -> `example` -> `www`),
//!   where the deepest valued node on the query's path wins
//!
//! ## Pattern forms
//!
//! | Pattern | Matches |
//! |---------|---------|
//! | `example.com` | `example.com` only |
//! | `*.example.com` | subdomains of `example.com`, not the apex |
//! | `*example.com` | `example.com` and all of its subdomains |
//!
//! ## Example
//!
//! ```
//! use addr_trie::DomainTrie;
//!
//! let mut trie = DomainTrie::new();
//! trie.insert("*.example.com", "sub").unwrap();
//! trie.insert("*test.com", "all").unwrap();
//!
//! assert_eq!(trie.find("www.example.com"), Some(&"sub"));
//! assert_eq!(trie.find("example.com"), None);
//! assert_eq!(trie.find("test.com"), Some(&"all"));
//! assert_eq!(trie.find("a.b.test.com"), Some(&"all"));
//! ```

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::{Result, TrieError};

#[derive(Debug, Clone)]
struct LabelNode<V> {
    children: HashMap<String, LabelNode<V>>,
    value: Option<V>,
}

impl<V> Default for LabelNode<V> {
    fn default() -> Self {
        Self {
            children: HashMap::new(),
            value: None,
        }
    }
}

/// Domain matcher with exact and wildcard-suffix patterns.
///
/// Patterns and queries are compared case-insensitively (ASCII).
#[derive(Debug, Clone)]
pub struct DomainTrie<V> {
    /// Full-domain entries, checked before the trie
    exact: HashMap<String, V>,
    root: LabelNode<V>,
    /// Number of trie nodes holding a value
    suffix_len: usize,
}

impl<V> Default for DomainTrie<V> {
    fn default() -> Self {
        Self {
            exact: HashMap::new(),
            root: LabelNode::default(),
            suffix_len: 0,
        }
    }
}

/// Lowercase `s`, only allocating when it contains uppercase ASCII.
fn normalize(s: &str) -> Cow<'_, str> {
    if s.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(s.to_ascii_lowercase())
    } else {
        Cow::Borrowed(s)
    }
}

impl<V> DomainTrie<V> {
    /// Create an empty matcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a domain.
    ///
    /// An exact-table hit is returned immediately, even if a wildcard would
    /// also match. Otherwise the value of the most specific (deepest)
    /// wildcard on the domain's label path is returned.
    pub fn find(&self, domain: &str) -> Option<&V> {
        let domain = normalize(domain);

        if let Some(value) = self.exact.get(domain.as_ref()) {
            return Some(value);
        }

        // A wildcard stored at depth n only covers names with more than n
        // labels, so a node's value is taken before descending, never after
        // the last label.
        let mut best = None;
        let mut node = &self.root;
        for label in domain.rsplit('.') {
            if let Some(value) = &node.value {
                best = Some(value);
            }
            match node.children.get(label) {
                Some(child) => node = child,
                None => break,
            }
        }
        best
    }

    /// Number of stored entries, counting exact-table and wildcard entries
    /// separately.
    pub fn len(&self) -> usize {
        self.exact.len() + self.suffix_len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert_suffix(&mut self, domain: &str, value: V) {
        let mut node = &mut self.root;
        for label in domain.rsplit('.') {
            node = node.children.entry(label.to_string()).or_default();
        }
        if node.value.replace(value).is_none() {
            self.suffix_len += 1;
        }
    }
}

impl<V: Clone> DomainTrie<V> {
    /// Add a domain pattern.
    ///
    /// The pattern must contain at least one `.`; see the module docs for
    /// the accepted forms. Re-adding a pattern replaces its value.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        let pattern = normalize(pattern.trim());

        if !pattern.contains('.') {
            debug!(pattern = %pattern, "rejected domain pattern without a dot");
            return Err(TrieError::InvalidPattern(pattern.into_owned()));
        }

        if let Some(base) = pattern.strip_prefix("*.") {
            ensure_base(base, &pattern)?;
            self.insert_suffix(base, value);
            trace!(pattern = %pattern, "inserted subdomain wildcard");
        } else if let Some(base) = pattern.strip_prefix('*') {
            ensure_base(base, &pattern)?;
            self.exact.insert(base.to_string(), value.clone());
            self.insert_suffix(base, value);
            trace!(pattern = %pattern, "inserted inclusive wildcard");
        } else {
            self.exact.insert(pattern.to_string(), value);
            trace!(pattern = %pattern, "inserted exact domain");
        }
        Ok(())
    }
}

fn ensure_base(base: &str, pattern: &str) -> Result<()> {
    if base.is_empty() {
        debug!(pattern, "rejected wildcard pattern without a base domain");
        return Err(TrieError::InvalidPattern(pattern.to_string()));
    }
    Ok(())
}
