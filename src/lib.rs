//! Addr Trie - longest-match address and domain classification for Rust
//!
//! This library maps an IPv4/IPv6 address or a domain name to a value using
//! longest-match semantics:
//! - IPv4 and IPv6 prefix tries with CIDR insertion and longest-prefix match
//! - Domain tries with exact and wildcard-suffix patterns
//! - A combined host table dispatching on the shape of the input
//!
//! # Example
//!
//! ```rust
//! use addr_trie::{DomainTrie, Ipv4Trie, Ipv6Trie};
//!
//! let mut v4 = Ipv4Trie::new();
//! v4.insert("10.0.0.0/8", "corp").unwrap();
//! v4.insert("10.1.0.0/16", "lab").unwrap();
//! assert_eq!(v4.find("10.1.2.3").unwrap(), Some(&"lab"));
//! assert_eq!(v4.find("10.2.3.4").unwrap(), Some(&"corp"));
//! assert_eq!(v4.find("11.0.0.0").unwrap(), None);
//!
//! let mut v6 = Ipv6Trie::new();
//! v6.insert("2001:db8::/32", "doc").unwrap();
//! assert_eq!(v6.find("2001:db8:1::1").unwrap(), Some(&"doc"));
//!
//! let mut domains = DomainTrie::new();
//! domains.insert("*.example.com", "sub").unwrap();
//! assert_eq!(domains.find("a.example.com"), Some(&"sub"));
//! assert_eq!(domains.find("example.com"), None);
//! ```
//!
//! # Pattern Syntax
//!
//! | Table | Example | Description |
//! |-------|---------|-------------|
//! | IPv4 | `1.2.3.4` | Single address (`/32`) |
//! | IPv4 | `192.168.0.0/16` | CIDR range |
//! | IPv4 | `192.168.0.0/255.255.0.0` | CIDR range with netmask |
//! | IPv6 | `2001:db8::/32` | CIDR range; IPv4-mapped forms are rejected |
//! | Domain | `example.com` | Exact domain match |
//! | Domain | `*.example.com` | Subdomains only |
//! | Domain | `*example.com` | Domain and all subdomains |
//!
//! # Lookup errors
//!
//! Both address tries return `Err` when the query is not an address of the
//! trie's family, and `Ok(None)` when it is valid but nothing matches.
//!
//! # Concurrency
//!
//! Tables are built with `&mut self` and queried with `&self`; once built
//! they can be shared freely. For concurrent incremental updates wrap a
//! table in [`Shared`] (feature `shared`, on by default).

pub mod error;
pub mod matcher;
pub mod parser;
#[cfg(feature = "shared")]
pub mod shared;
pub mod table;

// Re-export commonly used items
pub use error::{Family, Result, TrieError};
pub use matcher::{DomainTrie, Ipv4Trie, Ipv6Trie, Matcher, PrefixTrie};
pub use parser::{parse_host, parse_prefix, Address};
#[cfg(feature = "shared")]
pub use shared::Shared;
pub use table::HostTable;
