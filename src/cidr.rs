//! Strict CIDR parsing and canonical set construction.
//!
//! Parsing never masks: `10.0.0.5/24` is rejected rather than silently turned
//! into `10.0.0.0/24`. Overly broad prefixes are rejected so that a single
//! compromised source cannot claim a large share of the address space.

use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;

use crate::error::CidrError;

/// Narrowest-allowed IPv4 prefix
pub const MIN_IPV4_PREFIX_LEN: u8 = 8;

/// Narrowest-allowed IPv6 prefix
pub const MIN_IPV6_PREFIX_LEN: u8 = 24;

/// Hard ceiling on entries per set
pub const MAX_CIDRS_PER_SET: usize = 4096;

/// A validated network: no host bits set, prefix not too broad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalCidr(IpNet);

impl CanonicalCidr {
    /// IP version (4 or 6)
    pub fn version(&self) -> u8 {
        match self.0 {
            IpNet::V4(_) => 4,
            IpNet::V6(_) => 6,
        }
    }

    pub fn network(&self) -> IpAddr {
        self.0.network()
    }

    pub fn prefix_len(&self) -> u8 {
        self.0.prefix_len()
    }

    pub fn as_ipnet(&self) -> &IpNet {
        &self.0
    }

    /// Canonical ordering key: (version, numeric network address, prefix length)
    fn sort_key(&self) -> (u8, u128, u8) {
        let addr = match self.0.network() {
            IpAddr::V4(v4) => u128::from(u32::from(v4)),
            IpAddr::V6(v6) => u128::from(v6),
        };
        (self.version(), addr, self.prefix_len())
    }
}

impl fmt::Display for CanonicalCidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for CanonicalCidr {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalCidr {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

/// Parse one CIDR strictly.
///
/// Surrounding whitespace is ignored. A bare address is a host network
/// (`/32` or `/128`).
///
/// # Examples
/// ```
/// use rangewarden::cidr::parse_cidr;
/// assert_eq!(parse_cidr(" 192.0.2.0/24 ").unwrap().to_string(), "192.0.2.0/24");
/// assert!(parse_cidr("192.0.2.5/24").is_err());
/// assert!(parse_cidr("10.0.0.0/7").is_err());
/// ```
pub fn parse_cidr(value: &str) -> Result<CanonicalCidr, CidrError> {
    let cidr = value.trim();
    if cidr.is_empty() {
        return Err(CidrError::Empty);
    }

    let net: IpNet = if cidr.contains('/') {
        cidr.parse()
            .map_err(|_| CidrError::Invalid(cidr.to_string()))?
    } else {
        let ip: IpAddr = cidr
            .parse()
            .map_err(|_| CidrError::Invalid(cidr.to_string()))?;
        IpNet::from(ip)
    };

    if net.addr() != net.network() {
        return Err(CidrError::HostBitsSet(cidr.to_string()));
    }

    let (version, min) = match net {
        IpNet::V4(_) => (4, MIN_IPV4_PREFIX_LEN),
        IpNet::V6(_) => (6, MIN_IPV6_PREFIX_LEN),
    };
    if net.prefix_len() < min {
        return Err(CidrError::TooBroad {
            value: cidr.to_string(),
            version,
            min,
        });
    }

    Ok(CanonicalCidr(net))
}

/// Ordered, duplicate-free set of canonical networks for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrSet(Vec<CanonicalCidr>);

impl CidrSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalCidr> {
        self.0.iter()
    }

    /// Canonical string forms, in canonical order
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

/// Parse, deduplicate and sort raw CIDR strings into a [`CidrSet`].
///
/// Fails on the first invalid entry, on an empty result, or when the result
/// exceeds [`MAX_CIDRS_PER_SET`].
pub fn canonicalize<I, S>(raw_cidrs: I) -> Result<CidrSet, CidrError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut nets = raw_cidrs
        .into_iter()
        .map(|raw| parse_cidr(raw.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    nets.sort_unstable();
    nets.dedup();

    if nets.is_empty() {
        return Err(CidrError::EmptySet);
    }
    if nets.len() > MAX_CIDRS_PER_SET {
        return Err(CidrError::TooMany {
            count: nets.len(),
            max: MAX_CIDRS_PER_SET,
        });
    }

    Ok(CidrSet(nets))
}
