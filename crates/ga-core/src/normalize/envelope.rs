use serde_json::{Map, Value};

/// How many `data` wrappers are unwrapped before giving up.
const MAX_DEPTH: usize = 4;

/// The chain of envelope objects reached by following `data` keys from the root.
///
/// `containers(&json!({"data": {"data": {..}}}))` yields the root, `root.data`
/// and `root.data.data`. A non-object root yields an empty chain.
pub(super) fn containers(value: &Value) -> Vec<&Map<String, Value>> {
    let mut chain = Vec::new();
    let mut current = value;
    while let Value::Object(obj) = current {
        chain.push(obj);
        if chain.len() > MAX_DEPTH {
            break;
        }
        match obj.get("data") {
            Some(next @ Value::Object(_)) => current = next,
            _ => break,
        }
    }
    chain
}

/// The deepest array in the chain, with the index of the container holding it.
///
/// A root array is returned with depth 0 and an empty chain. Within one
/// container, the resource-named key is preferred over `data`.
pub(super) fn deepest_array<'a>(
    root: &'a Value,
    chain: &[&'a Map<String, Value>],
    collection_key: Option<&str>,
) -> Option<(&'a [Value], usize)> {
    if let Value::Array(items) = root {
        return Some((items.as_slice(), 0));
    }
    for (depth, obj) in chain.iter().copied().enumerate().rev() {
        let keyed = collection_key.and_then(|k| obj.get(k));
        if let Some(Value::Array(items)) = keyed {
            return Some((items.as_slice(), depth));
        }
        if let Some(Value::Array(items)) = obj.get("data") {
            return Some((items.as_slice(), depth));
        }
    }
    None
}

/// Look a metadata field up, deepest container first, also inside
/// `pagination` / `meta` sub-objects.
pub(super) fn meta_lookup(
    chain: &[&Map<String, Value>],
    names: &[&str],
    parse: fn(&Value) -> Option<u64>,
) -> Option<u64> {
    for obj in chain.iter().rev() {
        for holder in [Some(*obj), sub(obj, "pagination"), sub(obj, "meta")]
            .into_iter()
            .flatten()
        {
            for name in names {
                if let Some(v) = holder.get(*name).and_then(parse) {
                    return Some(v);
                }
            }
        }
    }
    None
}

fn sub<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    obj.get(key).and_then(Value::as_object)
}
