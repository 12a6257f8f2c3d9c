//! Address and CIDR parsing.
//!
//! Turns `address` or `address/prefix` text into a fixed-width integer in
//! network bit order plus a prefix length. The prefix may be written as a
//! decimal length (`10.0.0.0/8`) or as a netmask of the same family
//! (`10.0.0.0/255.0.0.0`); netmasks must be a contiguous run of one-bits.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use ipnet::{Ipv4Net, Ipv6Net};

use crate::error::{Family, Result, TrieError};

/// An address family the prefix trie can be keyed by.
pub trait Address: Copy + fmt::Display {
    /// Family tag used in error reporting
    const FAMILY: Family;

    /// Fixed-width integer holding the address bits (MSB = first bit)
    type Bits: Copy;

    /// Narrow a parsed address to this family, rejecting the other one.
    fn from_ip(ip: IpAddr, text: &str) -> Result<Self>;

    /// Reject values of this family that really encode another family.
    fn validate(self) -> Result<Self>;

    /// Address bits as an unsigned integer.
    fn to_bits(self) -> Self::Bits;

    /// Bit `index` of `bits`, counting from the most significant bit.
    fn bit(bits: Self::Bits, index: u8) -> usize;

    /// The address with all bits past `prefix_len` cleared.
    fn network(self, prefix_len: u8) -> Result<Self>;

    /// Prefix length of a netmask, or `None` if the mask is not contiguous.
    fn mask_to_prefix(self) -> Option<u8>;
}

impl Address for Ipv4Addr {
    const FAMILY: Family = Family::V4;
    type Bits = u32;

    fn from_ip(ip: IpAddr, text: &str) -> Result<Self> {
        match ip {
            IpAddr::V4(v4) => Ok(v4),
            IpAddr::V6(_) => Err(family_mismatch(Family::V4, text)),
        }
    }

    fn validate(self) -> Result<Self> {
        Ok(self)
    }

    #[inline]
    fn to_bits(self) -> u32 {
        u32::from(self)
    }

    #[inline]
    fn bit(bits: u32, index: u8) -> usize {
        debug_assert!(index < 32);
        ((bits >> (31 - index)) & 1) as usize
    }

    fn network(self, prefix_len: u8) -> Result<Self> {
        Ipv4Net::new(self, prefix_len)
            .map(|net| net.network())
            .map_err(|_| TrieError::InvalidPrefixLength {
                family: Family::V4,
                len: prefix_len.to_string(),
            })
    }

    fn mask_to_prefix(self) -> Option<u8> {
        ipnet::ipv4_mask_to_prefix(self).ok()
    }
}

impl Address for Ipv6Addr {
    const FAMILY: Family = Family::V6;
    type Bits = u128;

    fn from_ip(ip: IpAddr, text: &str) -> Result<Self> {
        match ip {
            IpAddr::V6(v6) => Ok(v6),
            IpAddr::V4(_) => Err(family_mismatch(Family::V6, text)),
        }
    }

    fn validate(self) -> Result<Self> {
        if is_ipv4_in_ipv6(self) {
            return Err(family_mismatch(Family::V6, &self.to_string()));
        }
        Ok(self)
    }

    #[inline]
    fn to_bits(self) -> u128 {
        u128::from(self)
    }

    #[inline]
    fn bit(bits: u128, index: u8) -> usize {
        debug_assert!(index < 128);
        ((bits >> (127 - index)) & 1) as usize
    }

    fn network(self, prefix_len: u8) -> Result<Self> {
        Ipv6Net::new(self, prefix_len)
            .map(|net| net.network())
            .map_err(|_| TrieError::InvalidPrefixLength {
                family: Family::V6,
                len: prefix_len.to_string(),
            })
    }

    fn mask_to_prefix(self) -> Option<u8> {
        ipnet::ipv6_mask_to_prefix(self).ok()
    }
}

/// IPv4-mapped (`::ffff:0:0/96`) and IPv4-compatible (`::/96`) addresses,
/// however they are spelled. The unspecified `::` and loopback `::1` stay
/// IPv6.
fn is_ipv4_in_ipv6(addr: Ipv6Addr) -> bool {
    if addr.to_ipv4_mapped().is_some() {
        return true;
    }
    let bits = u128::from(addr);
    bits >> 32 == 0 && bits > 1
}

fn family_mismatch(expected: Family, text: &str) -> TrieError {
    TrieError::AddressFamilyMismatch {
        expected,
        input: text.to_string(),
    }
}

fn parse_address<A: Address>(text: &str) -> Result<A> {
    let ip: IpAddr = text
        .parse()
        .map_err(|_| TrieError::InvalidAddress(text.to_string()))?;
    A::from_ip(ip, text)?
        .validate()
        .map_err(|_| family_mismatch(A::FAMILY, text))
}

fn parse_prefix_len<A: Address>(mask: &str) -> Result<u8> {
    let invalid_len = || TrieError::InvalidPrefixLength {
        family: A::FAMILY,
        len: mask.to_string(),
    };

    if !mask.is_empty() && mask.bytes().all(|b| b.is_ascii_digit()) {
        let len: u8 = mask.parse().map_err(|_| invalid_len())?;
        if len > A::FAMILY.bits() {
            return Err(invalid_len());
        }
        return Ok(len);
    }

    // Netmask form
    let ip: IpAddr = mask.parse().map_err(|_| invalid_len())?;
    let mask_addr = A::from_ip(ip, mask)?;
    mask_addr
        .mask_to_prefix()
        .ok_or_else(|| TrieError::NonCanonicalMask(mask.to_string()))
}

/// Parse an `address` or `address/prefix` pattern.
///
/// A bare address yields the full address width as its prefix length. For
/// CIDR input the host bits past the prefix are cleared.
pub fn parse_prefix<A: Address>(text: &str) -> Result<(A::Bits, u8)> {
    let text = text.trim();

    match text.split_once('/') {
        Some((addr, mask)) => {
            let addr: A = parse_address(addr.trim())?;
            let prefix_len = parse_prefix_len::<A>(mask.trim())?;
            Ok((addr.network(prefix_len)?.to_bits(), prefix_len))
        }
        None => {
            let addr: A = parse_address(text)?;
            Ok((addr.to_bits(), A::FAMILY.bits()))
        }
    }
}

/// Parse a bare address used as a lookup key. Masks are not accepted here.
pub fn parse_host<A: Address>(text: &str) -> Result<A::Bits> {
    let text = text.trim();
    if text.contains('/') {
        return Err(TrieError::InvalidAddress(text.to_string()));
    }
    parse_address::<A>(text).map(A::to_bits)
}
