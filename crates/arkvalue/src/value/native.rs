use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::error::ValueResult;
use crate::machine::Machine;
use crate::value::Value;

/// Native procedure signature - host function callable from bytecode.
///
/// The arguments are handed over as a mutable sequence so the procedure can
/// consume them in place. The machine running the call is passed alongside;
/// it is only borrowed for the duration of the call.
pub type NativeFn = dyn Fn(&mut Vec<Value>, &mut dyn Machine) -> ValueResult<Value>;

/// A host-provided callable.
///
/// Copies share the underlying function, and equality is identity of that
/// function: two procedures with the same behaviour built separately are
/// different values.
#[derive(Clone)]
pub struct NativeProc {
    inner: Rc<NativeInner<NativeFn>>,
}

/// Name and function share one allocation so the handle stays a fat pointer
struct NativeInner<F: ?Sized> {
    name: SmolStr,
    func: F,
}

impl NativeProc {
    pub fn new<F>(name: impl Into<SmolStr>, func: F) -> Self
    where
        F: Fn(&mut Vec<Value>, &mut dyn Machine) -> ValueResult<Value> + 'static,
    {
        let inner: Rc<NativeInner<NativeFn>> = Rc::new(NativeInner {
            name: name.into(),
            func,
        });
        NativeProc { inner }
    }

    /// Name given at registration, used for diagnostics only
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn call(&self, args: &mut Vec<Value>, machine: &mut dyn Machine) -> ValueResult<Value> {
        tracing::trace!(
            proc_name = %self.inner.name,
            argc = args.len(),
            mode = ?machine.mode(),
            "calling native procedure"
        );
        (self.inner.func)(args, machine)
    }

    /// Same underlying function object
    #[inline(always)]
    pub fn ptr_eq(&self, other: &NativeProc) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PartialEq for NativeProc {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for NativeProc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeProc({})", self.inner.name)
    }
}
