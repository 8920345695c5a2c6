use std::fmt;

/// The four named constants of the language.
///
/// Deliberately not `PartialOrd`: sentinel ordering is the asymmetric
/// "true is maximal" rule implemented in [`Value::less_than`](crate::Value::less_than).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    Nil,
    False,
    True,
    Undefined,
}

impl Sentinel {
    pub fn name(self) -> &'static str {
        match self {
            Sentinel::Nil => "nil",
            Sentinel::False => "false",
            Sentinel::True => "true",
            Sentinel::Undefined => "undefined",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nil" => Some(Sentinel::Nil),
            "false" => Some(Sentinel::False),
            "true" => Some(Sentinel::True),
            "undefined" => Some(Sentinel::Undefined),
            _ => None,
        }
    }

    /// `a < b` holds only when they differ and `b` is `true`
    #[inline(always)]
    pub fn less_than(self, other: Sentinel) -> bool {
        self != other && other == Sentinel::True
    }
}

impl From<bool> for Sentinel {
    #[inline(always)]
    fn from(b: bool) -> Self {
        if b { Sentinel::True } else { Sentinel::False }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
