//! HTTP verb bit-sets.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use hyper::Method;

/// Bit-set of HTTP verbs a route accepts.
///
/// A route carries a set (`VerbSet::GET | VerbSet::POST`); an incoming
/// request carries exactly one verb, and matching is set intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerbSet(u8);

impl VerbSet {
    pub const NONE: VerbSet = VerbSet(0);
    pub const GET: VerbSet = VerbSet(1);
    pub const PUT: VerbSet = VerbSet(1 << 1);
    pub const POST: VerbSet = VerbSet(1 << 2);
    pub const DELETE: VerbSet = VerbSet(1 << 3);
    pub const OPTIONS: VerbSet = VerbSet(1 << 4);
    pub const ALL: VerbSet = VerbSet(0b1_1111);

    /// Map a request method to a single-verb set.
    ///
    /// Methods outside the supported set map to GET, so e.g. HEAD requests
    /// are served by GET routes.
    pub fn from_method(method: &Method) -> VerbSet {
        match *method {
            Method::GET => VerbSet::GET,
            Method::PUT => VerbSet::PUT,
            Method::POST => VerbSet::POST,
            Method::DELETE => VerbSet::DELETE,
            Method::OPTIONS => VerbSet::OPTIONS,
            _ => VerbSet::GET,
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when the two sets share at least one verb.
    pub fn intersects(self, other: VerbSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Individual verb names in this set; the `NONE`/`ALL` markers never
    /// appear in the output.
    pub fn names(self) -> Vec<&'static str> {
        const TABLE: [(VerbSet, &str); 5] = [
            (VerbSet::GET, "GET"),
            (VerbSet::PUT, "PUT"),
            (VerbSet::POST, "POST"),
            (VerbSet::DELETE, "DELETE"),
            (VerbSet::OPTIONS, "OPTIONS"),
        ];
        TABLE
            .iter()
            .filter(|(verb, _)| self.intersects(*verb))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for VerbSet {
    type Output = VerbSet;

    fn bitor(self, rhs: VerbSet) -> VerbSet {
        VerbSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for VerbSet {
    fn bitor_assign(&mut self, rhs: VerbSet) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for VerbSet {
    /// Human-readable form used in `Access-Control-Allow-Methods`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names().join(", "))
    }
}
