// Tests for exactly-once construction/destruction of payloads
use crate::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Default)]
struct Counters {
    constructed: Cell<usize>,
    dropped: Cell<usize>,
}

impl Counters {
    fn live(&self) -> usize {
        self.constructed.get() - self.dropped.get()
    }
}

/// Counts every construction (including copies) and every drop
#[derive(UserType)]
#[user(name = "Tracked")]
struct Tracked {
    counters: Rc<Counters>,
}

impl Tracked {
    fn new(counters: &Rc<Counters>) -> Self {
        counters.constructed.set(counters.constructed.get() + 1);
        Tracked {
            counters: counters.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Tracked::new(&self.counters)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.dropped.set(self.counters.dropped.get() + 1);
    }
}

fn random_value(rng: &mut StdRng, counters: &Rc<Counters>, depth: usize) -> Value {
    match rng.gen_range(0..6) {
        0 => Value::number(rng.gen_range(-100.0..100.0)),
        1 => Value::string("payload"),
        2 => Value::user(Tracked::new(counters)),
        3 if depth < 3 => {
            let len = rng.gen_range(0..4);
            Value::list((0..len).map(|_| random_value(rng, counters, depth + 1)).collect())
        }
        4 => Value::closure(Closure::new(Scope::new(), rng.gen_range(0..64))),
        _ => Value::nil(),
    }
}

#[test]
fn test_copy_and_drop_are_balanced() {
    let counters = Rc::new(Counters::default());
    {
        let a = Value::user(Tracked::new(&counters));
        let b = a.clone();
        let list = Value::list(vec![a.clone(), b.clone()]);
        let _deep = list.clone();
        assert_eq!(counters.live(), 6);
    }
    assert_eq!(counters.constructed.get(), 6);
    assert_eq!(counters.dropped.get(), 6);
}

#[test]
fn test_assign_drops_old_payload_once() {
    let counters = Rc::new(Counters::default());
    let mut slot = Value::user(Tracked::new(&counters));

    slot.assign(&Value::number(1.0));
    assert_eq!(counters.dropped.get(), 1);
    assert_eq!(counters.live(), 0);

    // trivial payloads carry nothing to drop
    slot.assign(&Value::page_addr(3));
    assert_eq!(counters.dropped.get(), 1);
}

#[test]
fn test_random_lifecycle_stress() {
    let counters = Rc::new(Counters::default());
    let mut rng = StdRng::seed_from_u64(0x5eed);

    {
        let mut slots: Vec<Value> = (0..16)
            .map(|_| random_value(&mut rng, &counters, 0))
            .collect();

        for _ in 0..5_000 {
            let i = rng.gen_range(0..slots.len());
            let j = rng.gen_range(0..slots.len());
            match rng.gen_range(0..5) {
                // construct over an existing slot
                0 => slots[i] = random_value(&mut rng, &counters, 0),
                // copy-assign
                1 => {
                    let source = slots[j].clone();
                    slots[i].assign(&source);
                }
                // append a copy when the slot is a list
                2 => {
                    let item = slots[j].clone();
                    if slots[i].is_list() && slots[i].try_list().map_or(0, |l| l.len()) < 8 {
                        slots[i].push_owned(item).unwrap();
                    }
                }
                // destroy and refill
                3 => {
                    drop(slots.swap_remove(i));
                    slots.push(Value::nil());
                }
                _ => {
                    let copy = slots[i].clone();
                    assert_eq!(copy.value_type(), slots[i].value_type());
                }
            }

            let held: usize = slots.iter().map(count_tracked).sum();
            assert_eq!(counters.live(), held);
        }
    }

    assert!(counters.constructed.get() > 0);
    assert_eq!(counters.constructed.get(), counters.dropped.get());
}

/// Tracked payloads reachable from `v`
fn count_tracked(v: &Value) -> usize {
    match v.data() {
        ValueData::User(u) if u.is::<Tracked>() => 1,
        ValueData::List(items) => items.iter().map(count_tracked).sum(),
        _ => 0,
    }
}
