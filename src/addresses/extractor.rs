//! Extracts a canonical address set from a loosely-structured text export
//!
//! Export payloads are line-oriented but noisy: a line may be a bare address,
//! an address embedded in log text, or garbage. Lines that do not yield a
//! valid IPv4/IPv6 address are expected noise and are skipped silently.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::IpAddr;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::AddressSet;

/// Cheap pre-extraction heuristic for IPv4 embedded in surrounding text.
/// This is only a candidate finder; validation happens in the `IpAddr`
/// parser, which also accepts IPv6-looking whole lines.
static DOTTED_QUAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})").unwrap());

/// Extract the set of valid addresses from a payload file.
pub fn extract_from_path(path: &Path) -> io::Result<AddressSet> {
    let file = File::open(path)?;
    let set = extract(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        count = set.len(),
        "extracted unique addresses from payload"
    );
    Ok(set)
}

/// Extract the set of valid addresses from any line-oriented text source.
///
/// Each non-empty trimmed line contributes at most one address: the first
/// embedded dotted-quad match if present, otherwise the whole line.
pub fn extract<R: BufRead>(input: R) -> io::Result<AddressSet> {
    let mut set = AddressSet::new();

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let candidate = match DOTTED_QUAD.find(line) {
            Some(m) => m.as_str(),
            None => line,
        };

        if let Ok(addr) = candidate.parse::<IpAddr>() {
            set.insert(addr);
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn extract_str(input: &str) -> AddressSet {
        extract(Cursor::new(input)).unwrap()
    }

    #[test]
    fn test_bare_addresses() {
        let set = extract_str("8.8.8.8\n1.1.1.1\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"8.8.8.8".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_embedded_address() {
        let set = extract_str("blocked host 203.0.113.7 at 12:00\n");
        assert_eq!(set.len(), 1);
        assert!(set.contains(&"203.0.113.7".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_garbage_lines_skipped() {
        let set = extract_str("not an address\n999.1.1.1\n\n   \n8.8.8.8\n");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicates_collapse() {
        let set = extract_str("8.8.8.8\nseen again: 8.8.8.8\n8.8.8.8\n");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ipv6_whole_line() {
        let set = extract_str("2001:db8::1\nfe80::5\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&"2001:db8::1".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_whitespace_trimmed() {
        let set = extract_str("   192.0.2.1  \n");
        assert!(set.contains(&"192.0.2.1".parse::<IpAddr>().unwrap()));
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_str("").is_empty());
    }
}
