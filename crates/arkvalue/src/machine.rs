//! The route from a value back into the machine executing it.
//!
//! Values never store a pointer to their machine. Whoever needs to re-enter
//! the machine (the interpreter at a call site, or a native procedure that
//! wants to call a managed function) passes it explicitly as
//! `&mut dyn Machine`. The borrow ends with the call, so a value can never
//! keep a machine alive and there is no machine/value ownership cycle.

use crate::error::{ValueError, ValueResult};
use crate::value::{Value, ValueData};

/// Execution flavour of the machine driving the current call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MachineMode {
    #[default]
    Plain,
    /// Instrumented build (breakpoints, tracing of every instruction)
    Debug,
}

/// What the value cell needs from a virtual machine
pub trait Machine {
    fn mode(&self) -> MachineMode;

    /// Run a managed function (`PageAddr` or `Closure` callee) to completion
    /// and return its result.
    fn call(&mut self, callee: &Value, args: Vec<Value>) -> ValueResult<Value>;
}

impl Value {
    /// Call this value with `args` on `machine`.
    ///
    /// Managed functions are handed to [`Machine::call`]; native procedures
    /// run directly and receive the same machine so they can call back in.
    pub fn resolve<I>(&self, machine: &mut dyn Machine, args: I) -> ValueResult<Value>
    where
        I: IntoIterator<Item = Value>,
    {
        match self.data() {
            ValueData::PageAddr(_) | ValueData::Closure(_) => {
                tracing::trace!(
                    callee = %self,
                    mode = ?machine.mode(),
                    "resolving managed function"
                );
                machine.call(self, args.into_iter().collect())
            }
            ValueData::NativeProc(proc_) => {
                let mut args: Vec<Value> = args.into_iter().collect();
                proc_.call(&mut args, machine)
            }
            ValueData::List(_)
            | ValueData::Number(_)
            | ValueData::String(_)
            | ValueData::Sentinel(_)
            | ValueData::User(_) => Err(ValueError::NotCallable(self.value_type())),
        }
    }
}
