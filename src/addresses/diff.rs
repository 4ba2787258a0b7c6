//! Day-over-day comparison of address snapshots

use tracing::info;

use super::AddressSet;

/// Return the addresses present in `current` but not in `previous`.
///
/// An absent previous snapshot means a first run: every address in the
/// current snapshot counts as newly seen.
pub fn newly_seen(current: &AddressSet, previous: Option<&AddressSet>) -> AddressSet {
    let Some(previous) = previous else {
        info!(
            count = current.len(),
            "no previous snapshot available, treating all addresses as new"
        );
        return current.clone();
    };

    let new: AddressSet = current.difference(previous).copied().collect();
    info!(
        newly_seen = new.len(),
        already_seen = current.len() - new.len(),
        "compared snapshots"
    );
    new
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;

    fn set(addrs: &[&str]) -> AddressSet {
        addrs.iter().map(|a| a.parse::<IpAddr>().unwrap()).collect()
    }

    #[test]
    fn test_absent_previous_returns_current() {
        let current = set(&["8.8.8.8", "1.1.1.1"]);
        assert_eq!(newly_seen(&current, None), current);
    }

    #[test]
    fn test_absent_previous_empty_current() {
        assert!(newly_seen(&AddressSet::new(), None).is_empty());
    }

    #[test]
    fn test_identical_snapshots_yield_nothing() {
        let s = set(&["8.8.8.8", "2001:db8::1"]);
        assert!(newly_seen(&s, Some(&s)).is_empty());
    }

    #[test]
    fn test_empty_previous_returns_current() {
        let current = set(&["8.8.8.8"]);
        assert_eq!(newly_seen(&current, Some(&AddressSet::new())), current);
    }

    #[test]
    fn test_only_new_addresses_returned() {
        let current = set(&["8.8.8.8", "1.1.1.1", "9.9.9.9"]);
        let previous = set(&["8.8.8.8", "1.1.1.1", "4.4.4.4"]);
        assert_eq!(newly_seen(&current, Some(&previous)), set(&["9.9.9.9"]));
    }
}
