// Cross-type equality and ordering
//
// Values of different tags are never equal and order by tag declaration
// order. Within a tag the payload decides; the const flag never matters.
use std::cmp::Ordering;

use crate::value::{Value, ValueData};

impl PartialEq for ValueData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ValueData::List(a), ValueData::List(b)) => a == b,
            // IEEE: NaN != NaN
            (ValueData::Number(a), ValueData::Number(b)) => a == b,
            (ValueData::String(a), ValueData::String(b)) => a == b,
            (ValueData::PageAddr(a), ValueData::PageAddr(b)) => a == b,
            (ValueData::Sentinel(a), ValueData::Sentinel(b)) => a == b,
            // identity of the callable, not behaviour
            (ValueData::NativeProc(a), ValueData::NativeProc(b)) => a == b,
            (ValueData::Closure(a), ValueData::Closure(b)) => a == b,
            (ValueData::User(a), ValueData::User(b)) => a == b,
            (
                ValueData::List(_)
                | ValueData::Number(_)
                | ValueData::String(_)
                | ValueData::PageAddr(_)
                | ValueData::Sentinel(_)
                | ValueData::NativeProc(_)
                | ValueData::Closure(_)
                | ValueData::User(_),
                _,
            ) => false,
        }
    }
}

impl PartialEq for Value {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Value {
    /// The language's `<`.
    ///
    /// Not a total order: sentinels only rank below `true` (nil, false and
    /// undefined are mutually unordered), and native procedures and closures
    /// are never less than anything.
    pub fn less_than(&self, other: &Value) -> bool {
        let (lhs, rhs) = (self.value_type(), other.value_type());
        if lhs != rhs {
            return lhs < rhs;
        }

        match (&self.data, &other.data) {
            (ValueData::List(a), ValueData::List(b)) => list_less_than(a, b),
            (ValueData::Number(a), ValueData::Number(b)) => a < b,
            (ValueData::String(a), ValueData::String(b)) => a < b,
            (ValueData::PageAddr(a), ValueData::PageAddr(b)) => a < b,
            (ValueData::Sentinel(a), ValueData::Sentinel(b)) => a.less_than(*b),
            (ValueData::NativeProc(_), ValueData::NativeProc(_)) => false,
            (ValueData::Closure(_), ValueData::Closure(_)) => false,
            (ValueData::User(a), ValueData::User(b)) => a.user_lt(&**b),
            // tags already known equal
            (
                ValueData::List(_)
                | ValueData::Number(_)
                | ValueData::String(_)
                | ValueData::PageAddr(_)
                | ValueData::Sentinel(_)
                | ValueData::NativeProc(_)
                | ValueData::Closure(_)
                | ValueData::User(_),
                _,
            ) => false,
        }
    }
}

/// Lexicographic compare driven by `less_than` only: elements unordered in
/// both directions count as equivalent and the scan moves on.
fn list_less_than(a: &[Value], b: &[Value]) -> bool {
    for (x, y) in a.iter().zip(b) {
        if x.less_than(y) {
            return true;
        }
        if y.less_than(x) {
            return false;
        }
    }
    a.len() < b.len()
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.less_than(other) {
            Some(Ordering::Less)
        } else if other.less_than(self) {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}
