//! `From` conversions into [`Value`] and `TryFrom` back out of it.
//!
//! # Built-in impls
//! - integers and floats → `Number` (every number is an `f64`)
//! - `&str`, `String` → `String`
//! - `PageAddr`, `Sentinel`, `bool` (→ `true` / `false` sentinels)
//! - `NativeProc`, `Closure`, `UserValue`
//! - `Vec<Value>` → `List` (moved, not copied)
//!
//! `u16` is deliberately absent: it is [`PageAddr`], use [`Value::number`]
//! for a numeric 16-bit operand.

use crate::error::{ValueError, ValueResult};
use crate::value::{
    Closure, NativeProc, PageAddr, Sentinel, UserValue, Value, ValueData, ValueType,
};

// ==================== Numbers ====================

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(n: $ty) -> Self {
                    Value::number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u32, f32, f64);

// ==================== Text ====================

impl From<&str> for Value {
    #[inline]
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

// ==================== Scalars ====================

impl From<PageAddr> for Value {
    #[inline]
    fn from(addr: PageAddr) -> Self {
        Value::page_addr(addr)
    }
}

impl From<Sentinel> for Value {
    #[inline]
    fn from(s: Sentinel) -> Self {
        Value::sentinel(s)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

// ==================== Owned payloads ====================

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<NativeProc> for Value {
    #[inline]
    fn from(p: NativeProc) -> Self {
        Value::native(p)
    }
}

impl From<Closure> for Value {
    #[inline]
    fn from(c: Closure) -> Self {
        Value::closure(c)
    }
}

impl From<UserValue> for Value {
    #[inline]
    fn from(u: UserValue) -> Self {
        Value::from_data(ValueData::User(u))
    }
}

impl From<ValueData> for Value {
    #[inline]
    fn from(data: ValueData) -> Self {
        Value::from_data(data)
    }
}

// ==================== Back out ====================

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        value.try_number()
    }
}

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        value.try_str().map(str::to_owned)
    }
}

impl TryFrom<&Value> for Sentinel {
    type Error = ValueError;

    fn try_from(value: &Value) -> ValueResult<Self> {
        value.try_sentinel()
    }
}

impl TryFrom<Value> for Vec<Value> {
    type Error = ValueError;

    fn try_from(value: Value) -> ValueResult<Self> {
        match value.into_data() {
            ValueData::List(items) => Ok(items),
            other => Err(ValueError::wrong_type(ValueType::List, other.value_type())),
        }
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::list(iter.into_iter().collect())
    }
}
