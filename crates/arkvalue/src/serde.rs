/// Serde support for values
///
/// Only plain data crosses the boundary:
/// - List -> sequence
/// - Number -> f64
/// - String -> string
/// - PageAddr -> u16
/// - nil / undefined -> unit (JSON null), true / false -> bool
/// - NativeProc, Closure, User -> error
///
/// Coming back, every number becomes a Number (a page address is not
/// distinguishable from one) and unit becomes nil. Maps have no value
/// counterpart and are rejected.
use std::fmt;

use ::serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use ::serde::ser::{Error as _, Serialize, SerializeSeq, Serializer};
use serde_json::Value as JsonValue;

use crate::value::{Sentinel, Value, ValueData};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.data() {
            ValueData::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ValueData::Number(n) => serializer.serialize_f64(*n),
            ValueData::String(s) => serializer.serialize_str(s),
            ValueData::PageAddr(addr) => serializer.serialize_u16(*addr),
            ValueData::Sentinel(Sentinel::True) => serializer.serialize_bool(true),
            ValueData::Sentinel(Sentinel::False) => serializer.serialize_bool(false),
            ValueData::Sentinel(Sentinel::Nil | Sentinel::Undefined) => serializer.serialize_unit(),
            ValueData::NativeProc(_) | ValueData::Closure(_) | ValueData::User(_) => Err(
                S::Error::custom(format!("cannot serialize a {} value", self.type_name())),
            ),
        }
    }
}

/// Convert a value to a serde_json::Value
pub fn to_json(value: &Value) -> Result<serde_json::Value, String> {
    serde_json::to_value(value).map_err(|e| format!("Failed to serialize to JSON: {}", e))
}

/// Convert a value to a JSON string
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String, String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.map_err(|e| format!("Failed to serialize to JSON: {}", e))
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, string, boolean, null or sequence")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::boolean(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::string(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::string(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::nil())
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::nil())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }
}

/// Convert a serde_json::Value to a value
pub fn from_json(json: &JsonValue) -> Result<Value, String> {
    match json {
        JsonValue::Null => Ok(Value::nil()),
        JsonValue::Bool(b) => Ok(Value::boolean(*b)),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Value::number)
            .ok_or_else(|| "Invalid JSON number".to_owned()),
        JsonValue::String(s) => Ok(Value::string(s.as_str())),
        JsonValue::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::list),
        JsonValue::Object(_) => Err("cannot convert a JSON object to a value".to_owned()),
    }
}

/// Parse a JSON string into a value
pub fn from_json_str(json: &str) -> Result<Value, String> {
    let parsed: JsonValue =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse JSON: {}", e))?;
    from_json(&parsed)
}
