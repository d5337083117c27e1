use crate::prelude_internal::*;

/// Merges `right` into the shape of `left`.
///
/// Only the keys of `left` survive. For each of them:
/// - keys listed in [`Options::fields_to_be_merged`] become the de-duplicated union of both
///   sides' elements, left first;
/// - nested maps merge recursively, treating a missing or falsy right side as empty;
/// - any other value is taken from `right` when it is truthy, else kept from `left`.
///
/// An empty or non-map `left` merges to an empty map.
pub fn merge(left: &Value, right: &Value, options: &Options) -> Value {
    let Some(left) = left.as_map().filter(|map| !map.0.is_empty()) else {
        return Value::empty_map();
    };
    let right = right.as_map();

    let mut merged = Map::default();
    for (key, value) in left.0.iter() {
        let other = right.and_then(|map| map.get(key));
        let merged_value = if options.fields_to_be_merged.contains(key) {
            union(value, other)
        } else if value.as_map().is_some() {
            match other.filter(|v| v.is_truthy()) {
                Some(other) => merge(value, other, options),
                None => merge(value, &Value::Null, options),
            }
        } else {
            other.filter(|v| v.is_truthy()).unwrap_or(value).clone()
        };
        merged.insert(key.clone(), merged_value);
    }
    Value::Map(merged)
}

fn union(left: &Value, right: Option<&Value>) -> Value {
    let mut seen = Set::default();
    for value in elements(Some(left)).chain(elements(right)) {
        seen.insert(value.clone());
    }
    Value::from(seen.into_vec())
}

fn elements(value: Option<&Value>) -> impl Iterator<Item = &Value> {
    let items: &[Value] = match value {
        None | Some(Value::Null) => &[],
        Some(Value::Array(array)) => &array.0,
        Some(Value::Tuple(tuple)) => &tuple.0,
        Some(Value::Set(set)) => set.as_slice(),
        Some(other) => core::slice::from_ref(other),
    };
    items.iter()
}
