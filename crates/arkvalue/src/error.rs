use thiserror::Error;

use crate::value::ValueType;

pub type ValueResult<T> = Result<T, ValueError>;

/// Errors reported by the value cell.
///
/// Every variant is detectable by the caller before the failing call
/// (branch on [`Value::value_type`](crate::Value::value_type) first); they
/// exist so that a wrong-arm access is reported instead of reading garbage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// An accessor or mutator was used on a value holding another payload
    #[error("TypeError: expected {expected}, got {found}")]
    WrongType {
        expected: ValueType,
        found: ValueType,
    },

    /// `Value::with_type` was asked for a tag that has no neutral payload
    #[error("TypeError: no default payload for {0}")]
    NoDefaultPayload(ValueType),

    /// Only page addresses, closures and native procedures can be called
    #[error("TypeError: {0} is not callable")]
    NotCallable(ValueType),

    /// Raised by a host function
    #[error("NativeError: {0}")]
    Native(String),

    /// Reported by the machine while running a managed function
    #[error("MachineError: {0}")]
    Machine(String),
}

impl ValueError {
    #[inline]
    pub(crate) fn wrong_type(expected: ValueType, found: ValueType) -> Self {
        ValueError::WrongType { expected, found }
    }
}
