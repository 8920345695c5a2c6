use arkvalue::{Closure, NativeProc, UserValue, Value, ValueData};
use std::mem::size_of;

fn main() {
    println!("=== Size Check ===");
    println!("Value: {} bytes", size_of::<Value>());
    println!("ValueData: {} bytes", size_of::<ValueData>());
    println!("  List / String: {} bytes", size_of::<Vec<Value>>());
    println!("  NativeProc: {} bytes", size_of::<NativeProc>());
    println!("  Closure: {} bytes", size_of::<Closure>());
    println!("  UserValue: {} bytes", size_of::<UserValue>());
}
