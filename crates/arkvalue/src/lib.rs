// ArkValue
// The tagged value cell shared by the interpreter, the native procedures and user extensions

// Lets `#[derive(UserType)]` expand to `arkvalue::...` paths inside this crate too.
extern crate self as arkvalue;

#[cfg(test)]
mod test;

pub mod error;
pub mod limits;
pub mod machine;
pub mod value;

#[cfg(feature = "serde")]
pub mod serde;

pub use arkvalue_derive::UserType;
pub use error::{ValueError, ValueResult};
pub use limits::RenderOptions;
pub use machine::{Machine, MachineMode};
pub use value::{
    Closure, NativeFn, NativeProc, PageAddr, Scope, Sentinel, UserType, UserValue, Value,
    ValueData, ValueType,
};
