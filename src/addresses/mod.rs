//! Address set extraction and day-over-day comparison

mod diff;
mod extractor;

pub use diff::newly_seen;
pub use extractor::{extract, extract_from_path};

use std::collections::HashSet;
use std::net::IpAddr;

/// A deduplicated set of validated addresses. Membership is over the
/// canonical parsed form, so spelling variants like `2001:0db8::1` and
/// `2001:db8::1` collapse to one member.
pub type AddressSet = HashSet<IpAddr>;
