//! Key/value argument normalization.

use serde_json::Value;

use super::Fields;

/// Key recording an item found in key position that is not a string.
pub const INVALID_KEY_TYPE: &str = "invalid_key_type";

/// Key recording a trailing item with no value to pair with.
pub const DANGLING_ARG: &str = "dangling_arg";

/// Turn a flat `key, value, key, value, ...` list into fields.
///
/// A string followed by another item forms a pair. A non-string in key
/// position is recorded under [`INVALID_KEY_TYPE`] and only that item is
/// consumed, so the item after it is read as a key on the next step. A last
/// item with nothing after it is recorded under [`DANGLING_ARG`].
pub fn normalize(args: &[Value]) -> Fields {
    let mut fields = Fields::with_capacity(args.len() / 2 + 1);
    let mut i = 0;

    while i < args.len() {
        let Some(next) = args.get(i + 1) else {
            fields.push(DANGLING_ARG, args[i].clone());
            break;
        };

        match &args[i] {
            Value::String(key) => {
                fields.push(key.as_str(), next.clone());
                i += 2;
            }
            other => {
                fields.push(INVALID_KEY_TYPE, other.clone());
                i += 1;
            }
        }
    }

    fields
}
