// Value - the tagged cell every VM register, constant and list slot holds
//
// One enum arm per payload; the arm is the tag. Scalars (Number, PageAddr,
// Sentinel) live inline, the rest own their heap data and are dropped exactly
// once when the arm is replaced or the Value goes away.
mod closure;
mod compare;
mod convert;
mod display;
mod native;
mod sentinel;
mod user_type;

use std::fmt;

use crate::error::{ValueError, ValueResult};

pub use closure::{Closure, Scope};
pub use display::Rendered;
pub use native::{NativeFn, NativeProc};
pub use sentinel::Sentinel;
pub use user_type::{UserType, UserValue};

/// Bytecode offset of a function entry point
pub type PageAddr = u16;

// ============ Type tag ============

/// Runtime discriminator of a [`Value`].
///
/// The declaration order is the cross-type ordering used by
/// [`Value::less_than`]; it is stable but carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    List,
    Number,
    String,
    PageAddr,
    Sentinel,
    NativeProc,
    Closure,
    User,
}

impl ValueType {
    pub fn name(self) -> &'static str {
        match self {
            ValueType::List => "List",
            ValueType::Number => "Number",
            ValueType::String => "String",
            ValueType::PageAddr => "PageAddr",
            ValueType::Sentinel => "Sentinel",
            ValueType::NativeProc => "NativeProc",
            ValueType::Closure => "Closure",
            ValueType::User => "User",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============ Payload ============

/// The live payload of a [`Value`]
#[derive(Debug, Clone)]
pub enum ValueData {
    List(Vec<Value>),
    Number(f64),
    String(String),
    PageAddr(PageAddr),
    Sentinel(Sentinel),
    NativeProc(NativeProc),
    Closure(Closure),
    User(UserValue),
}

impl ValueData {
    #[inline(always)]
    pub fn value_type(&self) -> ValueType {
        match self {
            ValueData::List(_) => ValueType::List,
            ValueData::Number(_) => ValueType::Number,
            ValueData::String(_) => ValueType::String,
            ValueData::PageAddr(_) => ValueType::PageAddr,
            ValueData::Sentinel(_) => ValueType::Sentinel,
            ValueData::NativeProc(_) => ValueType::NativeProc,
            ValueData::Closure(_) => ValueType::Closure,
            ValueData::User(_) => ValueType::User,
        }
    }
}

// ============ Value ============

#[derive(Clone)]
pub struct Value {
    data: ValueData,
    is_const: bool,
}

impl Value {
    // ============ Constructors ============

    #[inline(always)]
    pub const fn from_data(data: ValueData) -> Self {
        Self {
            data,
            is_const: false,
        }
    }

    #[inline(always)]
    pub const fn number(n: f64) -> Self {
        Self::from_data(ValueData::Number(n))
    }

    #[inline(always)]
    pub fn string(s: impl Into<String>) -> Self {
        Self::from_data(ValueData::String(s.into()))
    }

    #[inline(always)]
    pub const fn list(items: Vec<Value>) -> Self {
        Self::from_data(ValueData::List(items))
    }

    #[inline(always)]
    pub const fn page_addr(addr: PageAddr) -> Self {
        Self::from_data(ValueData::PageAddr(addr))
    }

    #[inline(always)]
    pub const fn sentinel(s: Sentinel) -> Self {
        Self::from_data(ValueData::Sentinel(s))
    }

    #[inline(always)]
    pub const fn nil() -> Self {
        Self::sentinel(Sentinel::Nil)
    }

    #[inline(always)]
    pub const fn undefined() -> Self {
        Self::sentinel(Sentinel::Undefined)
    }

    #[inline(always)]
    pub const fn boolean(b: bool) -> Self {
        Self::sentinel(if b { Sentinel::True } else { Sentinel::False })
    }

    #[inline(always)]
    pub fn native(proc_: NativeProc) -> Self {
        Self::from_data(ValueData::NativeProc(proc_))
    }

    #[inline(always)]
    pub fn closure(closure: Closure) -> Self {
        Self::from_data(ValueData::Closure(closure))
    }

    pub fn user<T: UserType>(data: T) -> Self {
        Self::from_data(ValueData::User(UserValue::new(data)))
    }

    /// Builds the neutral payload for `ty`: an empty list, `0`, an empty
    /// string, address `0` or `nil`.
    ///
    /// Callables and user types have no neutral payload.
    pub fn with_type(ty: ValueType) -> ValueResult<Self> {
        let data = match ty {
            ValueType::List => ValueData::List(Vec::new()),
            ValueType::Number => ValueData::Number(0.0),
            ValueType::String => ValueData::String(String::new()),
            ValueType::PageAddr => ValueData::PageAddr(0),
            ValueType::Sentinel => ValueData::Sentinel(Sentinel::Nil),
            ValueType::NativeProc | ValueType::Closure | ValueType::User => {
                return Err(ValueError::NoDefaultPayload(ty));
            }
        };
        Ok(Self::from_data(data))
    }

    // ============ Lifecycle ============

    /// Copy-assign: the old payload is dropped, then `other` is cloned in.
    pub fn assign(&mut self, other: &Value) {
        self.clone_from(other);
    }

    /// Replace the payload, keeping the const flag. Returns the old payload.
    pub fn replace(&mut self, data: ValueData) -> ValueData {
        std::mem::replace(&mut self.data, data)
    }

    #[inline(always)]
    pub fn data(&self) -> &ValueData {
        &self.data
    }

    #[inline(always)]
    pub fn into_data(self) -> ValueData {
        self.data
    }

    // ============ Const flag ============

    #[inline(always)]
    pub fn is_const(&self) -> bool {
        self.is_const
    }

    #[inline(always)]
    pub fn set_const(&mut self, is_const: bool) {
        self.is_const = is_const;
    }

    pub fn into_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    // ============ Type checking ============

    #[inline(always)]
    pub fn value_type(&self) -> ValueType {
        self.data.value_type()
    }

    #[inline(always)]
    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    #[inline(always)]
    pub fn is_list(&self) -> bool {
        matches!(self.data, ValueData::List(_))
    }

    #[inline(always)]
    pub fn is_number(&self) -> bool {
        matches!(self.data, ValueData::Number(_))
    }

    #[inline(always)]
    pub fn is_string(&self) -> bool {
        matches!(self.data, ValueData::String(_))
    }

    #[inline(always)]
    pub fn is_page_addr(&self) -> bool {
        matches!(self.data, ValueData::PageAddr(_))
    }

    #[inline(always)]
    pub fn is_sentinel(&self) -> bool {
        matches!(self.data, ValueData::Sentinel(_))
    }

    #[inline(always)]
    pub fn is_nil(&self) -> bool {
        matches!(self.data, ValueData::Sentinel(Sentinel::Nil))
    }

    #[inline(always)]
    pub fn is_native_proc(&self) -> bool {
        matches!(self.data, ValueData::NativeProc(_))
    }

    #[inline(always)]
    pub fn is_closure(&self) -> bool {
        matches!(self.data, ValueData::Closure(_))
    }

    #[inline(always)]
    pub fn is_user(&self) -> bool {
        matches!(self.data, ValueData::User(_))
    }

    /// Page addresses, closures and native procedures can all be called
    #[inline(always)]
    pub fn is_function(&self) -> bool {
        matches!(
            self.data,
            ValueData::PageAddr(_) | ValueData::Closure(_) | ValueData::NativeProc(_)
        )
    }

    // ============ Option accessors ============

    #[inline(always)]
    pub fn as_number(&self) -> Option<f64> {
        match self.data {
            ValueData::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_str(&self) -> Option<&str> {
        match &self.data {
            ValueData::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_list(&self) -> Option<&[Value]> {
        match &self.data {
            ValueData::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_page_addr(&self) -> Option<PageAddr> {
        match self.data {
            ValueData::PageAddr(addr) => Some(addr),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_sentinel(&self) -> Option<Sentinel> {
        match self.data {
            ValueData::Sentinel(s) => Some(s),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_native_proc(&self) -> Option<&NativeProc> {
        match &self.data {
            ValueData::NativeProc(p) => Some(p),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_closure(&self) -> Option<&Closure> {
        match &self.data {
            ValueData::Closure(c) => Some(c),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn as_user(&self) -> Option<&UserValue> {
        match &self.data {
            ValueData::User(u) => Some(u),
            _ => None,
        }
    }

    /// The concrete user type, if this is a `User` value holding a `T`
    pub fn downcast_user<T: UserType>(&self) -> Option<&T> {
        self.as_user().and_then(|u| u.downcast_ref::<T>())
    }

    pub fn downcast_user_mut<T: UserType>(&mut self) -> Option<&mut T> {
        match &mut self.data {
            ValueData::User(u) => u.downcast_mut::<T>(),
            _ => None,
        }
    }

    // ============ Checked accessors ============

    pub fn try_number(&self) -> ValueResult<f64> {
        self.as_number()
            .ok_or_else(|| ValueError::wrong_type(ValueType::Number, self.value_type()))
    }

    pub fn try_str(&self) -> ValueResult<&str> {
        match &self.data {
            ValueData::String(s) => Ok(s),
            other => Err(ValueError::wrong_type(ValueType::String, other.value_type())),
        }
    }

    /// Mutable text payload; the tag stays `String`
    pub fn try_string_mut(&mut self) -> ValueResult<&mut String> {
        match &mut self.data {
            ValueData::String(s) => Ok(s),
            other => Err(ValueError::wrong_type(ValueType::String, other.value_type())),
        }
    }

    pub fn try_list(&self) -> ValueResult<&[Value]> {
        match &self.data {
            ValueData::List(items) => Ok(items),
            other => Err(ValueError::wrong_type(ValueType::List, other.value_type())),
        }
    }

    /// Mutable list payload; the tag stays `List`
    pub fn try_list_mut(&mut self) -> ValueResult<&mut Vec<Value>> {
        match &mut self.data {
            ValueData::List(items) => Ok(items),
            other => Err(ValueError::wrong_type(ValueType::List, other.value_type())),
        }
    }

    pub fn try_page_addr(&self) -> ValueResult<PageAddr> {
        self.as_page_addr()
            .ok_or_else(|| ValueError::wrong_type(ValueType::PageAddr, self.value_type()))
    }

    pub fn try_sentinel(&self) -> ValueResult<Sentinel> {
        self.as_sentinel()
            .ok_or_else(|| ValueError::wrong_type(ValueType::Sentinel, self.value_type()))
    }

    pub fn try_native_proc(&self) -> ValueResult<&NativeProc> {
        self.as_native_proc()
            .ok_or_else(|| ValueError::wrong_type(ValueType::NativeProc, self.value_type()))
    }

    pub fn try_closure(&self) -> ValueResult<&Closure> {
        self.as_closure()
            .ok_or_else(|| ValueError::wrong_type(ValueType::Closure, self.value_type()))
    }

    pub fn try_closure_mut(&mut self) -> ValueResult<&mut Closure> {
        match &mut self.data {
            ValueData::Closure(c) => Ok(c),
            other => Err(ValueError::wrong_type(ValueType::Closure, other.value_type())),
        }
    }

    pub fn try_user(&self) -> ValueResult<&UserValue> {
        self.as_user()
            .ok_or_else(|| ValueError::wrong_type(ValueType::User, self.value_type()))
    }

    pub fn try_user_mut(&mut self) -> ValueResult<&mut UserValue> {
        match &mut self.data {
            ValueData::User(u) => Ok(u),
            other => Err(ValueError::wrong_type(ValueType::User, other.value_type())),
        }
    }

    // ============ List helpers ============

    /// Copy-append onto a list value
    pub fn push(&mut self, value: &Value) -> ValueResult<()> {
        self.try_list_mut()?.push(value.clone());
        Ok(())
    }

    /// Move-append onto a list value
    pub fn push_owned(&mut self, value: Value) -> ValueResult<()> {
        self.try_list_mut()?.push(value);
        Ok(())
    }

    // ============ Truthiness ============

    /// Empty lists and strings, `0` and every sentinel but `true` are falsy.
    /// Page addresses and callables are always truthy; user types decide.
    pub fn is_truthy(&self) -> bool {
        match &self.data {
            ValueData::List(items) => !items.is_empty(),
            ValueData::Number(n) => *n != 0.0,
            ValueData::String(s) => !s.is_empty(),
            ValueData::Sentinel(s) => *s == Sentinel::True,
            ValueData::User(u) => u.user_truthy(),
            ValueData::PageAddr(_) | ValueData::NativeProc(_) | ValueData::Closure(_) => true,
        }
    }

    #[inline(always)]
    pub fn is_falsy(&self) -> bool {
        !self.is_truthy()
    }
}

impl Default for Value {
    #[inline(always)]
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{:?}", self.data)
    }
}

/// Logical negation: `!&v` is `true` when `v` is falsy
impl std::ops::Not for &Value {
    type Output = bool;

    #[inline(always)]
    fn not(self) -> bool {
        self.is_falsy()
    }
}

impl std::ops::Not for Value {
    type Output = bool;

    #[inline(always)]
    fn not(self) -> bool {
        self.is_falsy()
    }
}
