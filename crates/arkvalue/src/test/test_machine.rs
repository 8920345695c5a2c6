// Tests for calling back into the machine
use crate::*;

/// Stand-in for the interpreter: "runs" a managed function by returning
/// its entry address plus the sum of the numeric arguments.
struct RecordingMachine {
    mode: MachineMode,
    calls: Vec<(PageAddr, usize)>,
}

impl RecordingMachine {
    fn new(mode: MachineMode) -> Self {
        RecordingMachine {
            mode,
            calls: Vec::new(),
        }
    }
}

impl Machine for RecordingMachine {
    fn mode(&self) -> MachineMode {
        self.mode
    }

    fn call(&mut self, callee: &Value, args: Vec<Value>) -> ValueResult<Value> {
        let addr = match callee.data() {
            ValueData::PageAddr(addr) => *addr,
            ValueData::Closure(c) => c.page_addr(),
            _ => return Err(ValueError::Machine(format!("cannot run {}", callee))),
        };
        self.calls.push((addr, args.len()));
        let sum: f64 = args.iter().filter_map(Value::as_number).sum();
        Ok(Value::number(addr as f64 + sum))
    }
}

#[test]
fn test_resolve_page_addr_goes_through_machine() {
    let mut vm = RecordingMachine::new(MachineMode::Plain);
    let f = Value::page_addr(100);

    let result = f.resolve(&mut vm, [Value::number(1.0), Value::number(2.0)]);
    assert_eq!(result, Ok(Value::number(103.0)));
    assert_eq!(vm.calls, vec![(100, 2)]);
}

#[test]
fn test_resolve_closure_goes_through_machine() {
    let mut vm = RecordingMachine::new(MachineMode::Debug);
    let f = Value::closure(Closure::new(Scope::new(), 50));

    assert_eq!(f.resolve(&mut vm, []), Ok(Value::number(50.0)));
    assert_eq!(vm.calls, vec![(50, 0)]);
}

#[test]
fn test_native_proc_reenters_machine() {
    // apply(f, x) calls the managed function f with x through the machine
    let apply = NativeProc::new("apply", |args, vm| {
        if args.len() != 2 {
            return Err(ValueError::Native("apply needs 2 arguments".into()));
        }
        let x = args.pop().unwrap_or_default();
        let f = args.pop().unwrap_or_default();
        f.resolve(vm, [x])
    });

    let mut vm = RecordingMachine::new(MachineMode::Plain);
    let result = Value::native(apply).resolve(
        &mut vm,
        [Value::page_addr(10), Value::number(5.0)],
    );

    assert_eq!(result, Ok(Value::number(15.0)));
    assert_eq!(vm.calls, vec![(10, 1)]);
}

#[test]
fn test_native_proc_sees_machine_mode() {
    let which = NativeProc::new("mode", |_args, vm| {
        Ok(Value::boolean(vm.mode() == MachineMode::Debug))
    });

    let mut plain = RecordingMachine::new(MachineMode::Plain);
    let mut debug = RecordingMachine::new(MachineMode::Debug);
    let mut args = Vec::new();

    assert_eq!(which.call(&mut args, &mut plain), Ok(Value::boolean(false)));
    assert_eq!(which.call(&mut args, &mut debug), Ok(Value::boolean(true)));
}

#[test]
fn test_native_proc_consumes_args_in_place() {
    let drain = NativeProc::new("drain", |args, _vm| {
        let n = args.len();
        args.clear();
        Ok(Value::from(n as f64))
    });

    let mut vm = RecordingMachine::new(MachineMode::Plain);
    let mut args = vec![Value::nil(), Value::nil()];
    assert_eq!(drain.call(&mut args, &mut vm), Ok(Value::number(2.0)));
    assert!(args.is_empty());
}

#[test]
fn test_non_callables_are_rejected() {
    let mut vm = RecordingMachine::new(MachineMode::Plain);
    for v in [
        Value::number(1.0),
        Value::string("f"),
        Value::list(vec![]),
        Value::nil(),
    ] {
        assert_eq!(
            v.resolve(&mut vm, []),
            Err(ValueError::NotCallable(v.value_type()))
        );
    }
    assert!(vm.calls.is_empty());
}

#[test]
fn test_errors_from_natives_propagate() {
    let fail = Value::native(NativeProc::new("fail", |_args, _vm| {
        Err(ValueError::Native("boom".into()))
    }));
    let mut vm = RecordingMachine::new(MachineMode::Plain);

    let err = fail.resolve(&mut vm, []).unwrap_err();
    assert_eq!(err.to_string(), "NativeError: boom");
}

#[test]
fn test_calling_does_not_change_the_value() {
    let f = Value::page_addr(1);
    let before = f.clone();
    let mut vm = RecordingMachine::new(MachineMode::Debug);
    let _ = f.resolve(&mut vm, [Value::nil()]);

    assert_eq!(f, before);
    assert_eq!(f.to_string(), "Function @ 1");
}
