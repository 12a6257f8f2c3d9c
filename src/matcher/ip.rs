use std::marker::PhantomData;
use std::net::{Ipv4Addr, Ipv6Addr};

use tracing::{debug, trace};

use crate::error::Result;
use crate::parser::{parse_host, parse_prefix, Address};

/// IPv4 longest-prefix-match trie
pub type Ipv4Trie<V> = PrefixTrie<Ipv4Addr, V>;

/// IPv6 longest-prefix-match trie
pub type Ipv6Trie<V> = PrefixTrie<Ipv6Addr, V>;

#[derive(Debug, Clone)]
struct BitNode<V> {
    children: [Option<Box<BitNode<V>>>; 2],
    value: Option<V>,
}

impl<V> Default for BitNode<V> {
    fn default() -> Self {
        Self {
            children: [None, None],
            value: None,
        }
    }
}

/// Binary trie over address bits with longest-prefix-match lookup.
///
/// Each level consumes one address bit, most significant first. A prefix of
/// length `n` stores its value at depth `n`; lookups walk the queried address
/// and return the value of the deepest valued node on the path.
#[derive(Debug, Clone)]
pub struct PrefixTrie<A: Address, V> {
    root: BitNode<V>,
    len: usize,
    _family: PhantomData<A>,
}

impl<A: Address, V> Default for PrefixTrie<A, V> {
    fn default() -> Self {
        Self {
            root: BitNode::default(),
            len: 0,
            _family: PhantomData,
        }
    }
}

impl<A: Address, V> PrefixTrie<A, V> {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value for an address or CIDR pattern.
    ///
    /// Inserting the same prefix again replaces the stored value. On a parse
    /// error the trie is left untouched.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        let (bits, prefix_len) = parse_prefix::<A>(pattern).inspect_err(|e| {
            debug!(pattern, family = %A::FAMILY, error = %e, "rejected prefix pattern");
        })?;
        self.insert_bits(bits, prefix_len, value);
        trace!(pattern, prefix_len, family = %A::FAMILY, "inserted prefix");
        Ok(())
    }

    /// Insert a value for `addr/prefix_len` without going through text.
    ///
    /// Addresses are held to the same family rules as text patterns, so the
    /// IPv6 trie rejects IPv4-mapped and IPv4-compatible addresses.
    pub fn insert_net(&mut self, addr: A, prefix_len: u8, value: V) -> Result<()> {
        let network = addr
            .validate()
            .and_then(|addr| addr.network(prefix_len))
            .inspect_err(|e| {
                debug!(%addr, prefix_len, family = %A::FAMILY, error = %e, "rejected prefix");
            })?;
        self.insert_bits(network.to_bits(), prefix_len, value);
        trace!(%addr, prefix_len, family = %A::FAMILY, "inserted prefix");
        Ok(())
    }

    /// Longest-prefix-match lookup of a bare address.
    ///
    /// Returns `Ok(None)` when no stored prefix contains the address, and an
    /// error when `address` is not a valid address of this family.
    pub fn find(&self, address: &str) -> Result<Option<&V>> {
        let bits = parse_host::<A>(address)?;
        Ok(self.find_bits(bits))
    }

    /// Longest-prefix-match lookup of a typed address.
    ///
    /// Addresses this trie would refuse to store (IPv4 encoded in IPv6) never
    /// match.
    pub fn find_addr(&self, addr: A) -> Option<&V> {
        let addr = addr.validate().ok()?;
        self.find_bits(addr.to_bits())
    }

    /// Number of stored prefixes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn insert_bits(&mut self, bits: A::Bits, prefix_len: u8, value: V) {
        let mut node = &mut self.root;
        for i in 0..prefix_len {
            let b = A::bit(bits, i);
            node = &mut **node.children[b].get_or_insert_with(Box::default);
        }
        if node.value.replace(value).is_none() {
            self.len += 1;
        }
    }

    fn find_bits(&self, bits: A::Bits) -> Option<&V> {
        let mut best = None;
        let mut node = &self.root;

        for i in 0..A::FAMILY.bits() {
            if let Some(value) = &node.value {
                best = Some(value);
            }
            match &node.children[A::bit(bits, i)] {
                Some(child) => node = &**child,
                None => break,
            }
        }

        // The walk may end on a node it never checked (full-width match)
        if let Some(value) = &node.value {
            best = Some(value);
        }
        best
    }
}
