// Textual rendering
//
// Numbers are printed with as many significant digits as they actually
// carry: the integer digits plus the fraction digits counted until the
// residue falls under an epsilon, then formatted like C's `%g` so `1` stays
// `1` and `0.1` stays `0.1`.
use std::cell::RefCell;
use std::fmt::{self, Display, Write};
use std::rc::Rc;

use crate::limits::{
    CLOSURE_LABEL, ITOA_FAST_PATH_LIMIT, NATIVE_PROC_LABEL, PAGE_ADDR_LABEL, RenderOptions,
};
use crate::value::{Closure, Scope, Value, ValueData};

/// A value paired with the options used to print it
pub struct Rendered<'a> {
    value: &'a Value,
    options: &'a RenderOptions,
}

impl Value {
    pub fn display_with<'a>(&'a self, options: &'a RenderOptions) -> Rendered<'a> {
        Rendered {
            value: self,
            options,
        }
    }

    pub fn render(&self, options: &RenderOptions) -> String {
        self.display_with(options).to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display_with(&RenderOptions::default()).fmt(f)
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self.value, self.options, &mut Vec::new())
    }
}

/// Scopes of the closures currently being printed, innermost last
type OpenScopes = Vec<*const RefCell<Scope>>;

fn write_value(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    options: &RenderOptions,
    open: &mut OpenScopes,
) -> fmt::Result {
    match value.data() {
        ValueData::Number(n) => f.write_str(&format_number(*n, options)),
        ValueData::String(s) => f.write_str(s),
        ValueData::PageAddr(addr) => write!(f, "{}{}", PAGE_ADDR_LABEL, addr),
        ValueData::Sentinel(s) => write!(f, "{}", s),
        ValueData::NativeProc(_) => f.write_str(NATIVE_PROC_LABEL),
        ValueData::List(items) => {
            f.write_char('[')?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_char(' ')?;
                }
                write_nested(f, item, options, open)?;
            }
            f.write_char(']')
        }
        ValueData::Closure(c) => write_closure(f, c, options, open),
        ValueData::User(u) => u.user_fmt(f),
    }
}

/// Element of a container: text gets quoted, everything else prints as usual
fn write_nested(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    options: &RenderOptions,
    open: &mut OpenScopes,
) -> fmt::Result {
    match value.data() {
        ValueData::String(s) => write!(f, "\"{}\"", s),
        _ => write_value(f, value, options, open),
    }
}

fn write_closure(
    f: &mut fmt::Formatter<'_>,
    closure: &Closure,
    options: &RenderOptions,
    open: &mut OpenScopes,
) -> fmt::Result {
    write!(f, "{}{}", CLOSURE_LABEL, closure.page_addr())?;
    let scope_ptr = Rc::as_ptr(closure.shared_scope());
    // a closure reachable from its own captures
    if open.contains(&scope_ptr) {
        return f.write_str(" (...)");
    }
    // scope mutably borrowed by a running native: print the address only
    let Some(scope) = closure.try_scope() else {
        return Ok(());
    };
    if scope.is_empty() {
        return Ok(());
    }

    open.push(scope_ptr);
    let result = write_scope(f, &scope, options, open);
    open.pop();
    result
}

fn write_scope(
    f: &mut fmt::Formatter<'_>,
    scope: &Scope,
    options: &RenderOptions,
    open: &mut OpenScopes,
) -> fmt::Result {
    f.write_str(" (")?;
    for (i, (name, value)) in scope.iter().enumerate() {
        if i > 0 {
            f.write_char(' ')?;
        }
        write!(f, ".{}=", name)?;
        write_nested(f, value, options, open)?;
    }
    f.write_char(')')
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_closure(f, self, &RenderOptions::default(), &mut Vec::new())
    }
}

// ============ Numbers ============

pub(crate) fn format_number(n: f64, options: &RenderOptions) -> String {
    if n.is_nan() {
        return "nan".to_owned();
    }
    if n.is_infinite() {
        let label = if n < 0.0 { "-inf" } else { "inf" };
        return label.to_owned();
    }
    if n.fract() == 0.0 && n.abs() < ITOA_FAST_PATH_LIMIT {
        if n == 0.0 && n.is_sign_negative() {
            return "-0".to_owned();
        }
        let mut buffer = itoa::Buffer::new();
        return buffer.format(n as i64).to_owned();
    }

    let max = options.max_significant_digits.max(1);
    let precision = (integer_digits(n) + fraction_digits(n, options)).clamp(1, max);
    format_general(n, precision)
}

/// Digits before the decimal point (0 for |n| < 1)
fn integer_digits(n: f64) -> usize {
    let mut int_part = n.abs().trunc();
    let mut count = 0;
    while int_part >= 1.0 {
        count += 1;
        int_part = (int_part / 10.0).trunc();
    }
    count
}

/// Significant fraction digits, at least one
fn fraction_digits(n: f64, options: &RenderOptions) -> usize {
    let mut shifted = n.abs();
    let mut places = 0;
    loop {
        shifted *= 10.0;
        let residue = shifted - shifted.trunc();
        places += 1;
        if residue <= options.fraction_epsilon || places >= options.max_significant_digits {
            return places;
        }
    }
}

/// `%g` with `precision` significant digits, trailing zeros removed
fn format_general(n: f64, precision: usize) -> String {
    let scientific = format!("{:.*e}", precision - 1, n);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let mut out = String::with_capacity(mantissa.len() + 5);
        out.push_str(trim_fraction(mantissa));
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        let magnitude = exponent.unsigned_abs();
        if magnitude < 10 {
            out.push('0');
        }
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(magnitude));
        out
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        let fixed = format!("{:.*}", decimals, n);
        trim_fraction(&fixed).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
