//! Combined host table.
//!
//! Routes each pattern and query to the IPv4, IPv6 or domain trie by its
//! shape, so callers can classify whatever host string they were handed.

use std::net::IpAddr;

use crate::error::Result;
use crate::matcher::{DomainTrie, Ipv4Trie, Ipv6Trie, Matcher};

/// IPv4, IPv6 and domain tables behind a single insert/find surface.
#[derive(Debug, Clone)]
pub struct HostTable<V> {
    v4: Ipv4Trie<V>,
    v6: Ipv6Trie<V>,
    domains: DomainTrie<V>,
}

impl<V> Default for HostTable<V> {
    fn default() -> Self {
        Self {
            v4: Ipv4Trie::new(),
            v6: Ipv6Trie::new(),
            domains: DomainTrie::new(),
        }
    }
}

impl<V> HostTable<V> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a host given as an IP literal or a domain name.
    pub fn find(&self, host: &str) -> Option<&V> {
        let host = host.trim();
        match host.parse::<IpAddr>() {
            Ok(ip) => self.find_ip(ip),
            Err(_) => self.domains.find(host),
        }
    }

    /// Look up a typed address. IPv4-mapped IPv6 addresses are looked up in
    /// the IPv4 table.
    pub fn find_ip(&self, ip: IpAddr) -> Option<&V> {
        match ip {
            IpAddr::V4(v4) => self.v4.find_addr(v4),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => self.v4.find_addr(v4),
                None => self.v6.find_addr(v6),
            },
        }
    }

    pub fn ipv4(&self) -> &Ipv4Trie<V> {
        &self.v4
    }

    pub fn ipv6(&self) -> &Ipv6Trie<V> {
        &self.v6
    }

    pub fn domains(&self) -> &DomainTrie<V> {
        &self.domains
    }

    /// Total number of stored entries across all tables
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len() + self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> HostTable<V> {
    /// Insert an IP, CIDR or domain pattern.
    ///
    /// Patterns whose address part parses as an IP go to the matching
    /// address trie (and fail there on bad masks); everything else is
    /// treated as a domain pattern.
    pub fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        let pattern = pattern.trim();
        let addr = pattern.split_once('/').map_or(pattern, |(addr, _)| addr);

        match addr.trim().parse::<IpAddr>() {
            Ok(IpAddr::V4(_)) => self.v4.insert(pattern, value),
            Ok(IpAddr::V6(_)) => self.v6.insert(pattern, value),
            Err(_) => self.domains.insert(pattern, value),
        }
    }
}

impl<V: Clone> Matcher<V> for HostTable<V> {
    fn insert(&mut self, pattern: &str, value: V) -> Result<()> {
        HostTable::insert(self, pattern, value)
    }

    fn lookup(&self, query: &str) -> Result<Option<&V>> {
        Ok(self.find(query))
    }
}

#[cfg(test)]
mod tests {
    use std::net::{Ipv4Addr, Ipv6Addr};

    use super::*;
    use crate::error::TrieError;

    fn sample_table() -> HostTable<&'static str> {
        let mut table = HostTable::new();
        table.insert("192.168.0.0/16", "lan").unwrap();
        table.insert("10.0.0.0/8", "corp").unwrap();
        table.insert("2001:db8::/32", "doc6").unwrap();
        table.insert("*.google.com", "google").unwrap();
        table.insert("*youtube.com", "youtube").unwrap();
        table.insert("example.com", "example").unwrap();
        table
    }

    #[test]
    fn test_routes_by_shape() {
        let table = sample_table();

        assert_eq!(table.find("192.168.1.1"), Some(&"lan"));
        assert_eq!(table.find("10.2.3.4"), Some(&"corp"));
        assert_eq!(table.find("2001:db8::1"), Some(&"doc6"));
        assert_eq!(table.find("www.google.com"), Some(&"google"));
        assert_eq!(table.find("youtube.com"), Some(&"youtube"));
        assert_eq!(table.find("example.com"), Some(&"example"));
        assert_eq!(table.find("8.8.8.8"), None);
        assert_eq!(table.find("google.com"), None);
    }

    #[test]
    fn test_counts() {
        let table = sample_table();
        assert_eq!(table.ipv4().len(), 2);
        assert_eq!(table.ipv6().len(), 1);
        // *youtube.com fills both the exact table and the trie
        assert_eq!(table.domains().len(), 4);
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_mapped_query_uses_ipv4_table() {
        let table = sample_table();
        let mapped = Ipv4Addr::new(10, 1, 1, 1).to_ipv6_mapped();

        assert_eq!(table.find_ip(IpAddr::V6(mapped)), Some(&"corp"));
        assert_eq!(table.find("::ffff:10.1.1.1"), Some(&"corp"));
        assert_eq!(table.find_ip(IpAddr::V6(Ipv6Addr::LOCALHOST)), None);
    }

    #[test]
    fn test_insert_errors_propagate() {
        let mut table = HostTable::new();
        assert!(matches!(
            table.insert("10.0.0.0/33", 1),
            Err(TrieError::InvalidPrefixLength { .. })
        ));
        assert!(matches!(
            table.insert("::ffff:10.0.0.0/104", 1),
            Err(TrieError::AddressFamilyMismatch { .. })
        ));
        assert!(matches!(
            table.insert("localhost", 1),
            Err(TrieError::InvalidPattern(_))
        ));
        assert!(table.is_empty());
    }
}
