//! Generic path-addressed mutation engine.
//!
//! Every operation follows an immutable-replace discipline: it takes the
//! current document by reference and returns a new document value, leaving
//! the input untouched. Out-of-bounds array indices are no-ops that return
//! a structurally identical document.

use serde_json::Value;

use super::path::{segments, PathError};

/// Resolve `path` against `doc`, walking nested objects only.
pub fn get<'a>(doc: &'a Value, path: &str) -> Result<&'a Value, PathError> {
    let mut current = doc;
    for seg in segments(path)? {
        let obj = current
            .as_object()
            .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;
        current = obj
            .get(seg)
            .ok_or_else(|| PathError::PathNotFound(path.to_string()))?;
    }
    Ok(current)
}

fn get_mut<'a>(doc: &'a mut Value, parts: &[&str], path: &str) -> Result<&'a mut Value, PathError> {
    let mut current = doc;
    for seg in parts {
        let obj = current
            .as_object_mut()
            .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;
        current = obj
            .get_mut(*seg)
            .ok_or_else(|| PathError::PathNotFound(path.to_string()))?;
    }
    Ok(current)
}

/// Replace (or insert) the leaf field addressed by `path`. The parent
/// containers must already exist; the default document literal guarantees
/// that for every editable field.
pub fn set(doc: &Value, path: &str, value: Value) -> Result<Value, PathError> {
    let parts = segments(path)?;
    let Some((leaf, parents)) = parts.split_last() else {
        return Err(PathError::Empty);
    };
    let mut next = doc.clone();
    let parent = get_mut(&mut next, parents, path)?;
    let obj = parent
        .as_object_mut()
        .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;
    obj.insert((*leaf).to_string(), value);
    Ok(next)
}

/// Append a deep copy of `default_record` to the array at `path`. A missing
/// or non-array leaf is initialized to an empty array first.
pub fn append_item(doc: &Value, path: &str, default_record: Value) -> Result<Value, PathError> {
    let parts = segments(path)?;
    let Some((leaf, parents)) = parts.split_last() else {
        return Err(PathError::Empty);
    };
    let mut next = doc.clone();
    let parent = get_mut(&mut next, parents, path)?;
    let obj = parent
        .as_object_mut()
        .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;
    let slot = obj.entry((*leaf).to_string()).or_insert(Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    if let Some(arr) = slot.as_array_mut() {
        arr.push(default_record);
    }
    Ok(next)
}

/// Set one field of the record at `path[index]`. Out-of-bounds indices
/// leave the document unchanged.
pub fn update_item_field(
    doc: &Value,
    path: &str,
    index: usize,
    field: &str,
    value: Value,
) -> Result<Value, PathError> {
    let parts = segments(path)?;
    let mut next = doc.clone();
    let arr = get_mut(&mut next, &parts, path)?
        .as_array_mut()
        .ok_or_else(|| PathError::NotAnArray(path.to_string()))?;
    if let Some(item) = arr.get_mut(index) {
        let obj = item
            .as_object_mut()
            .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;
        obj.insert(field.to_string(), value);
    }
    Ok(next)
}

/// Replace the whole element at `path[index]`; used for arrays of plain
/// strings (model names). Out-of-bounds indices are no-ops.
pub fn update_string_item(
    doc: &Value,
    path: &str,
    index: usize,
    value: &str,
) -> Result<Value, PathError> {
    let parts = segments(path)?;
    let mut next = doc.clone();
    let arr = get_mut(&mut next, &parts, path)?
        .as_array_mut()
        .ok_or_else(|| PathError::NotAnArray(path.to_string()))?;
    if let Some(item) = arr.get_mut(index) {
        *item = Value::String(value.to_string());
    }
    Ok(next)
}

/// Remove the element at `path[index]`, shifting later elements down.
/// Out-of-bounds indices are no-ops.
pub fn remove_item(doc: &Value, path: &str, index: usize) -> Result<Value, PathError> {
    let parts = segments(path)?;
    let mut next = doc.clone();
    let arr = get_mut(&mut next, &parts, path)?
        .as_array_mut()
        .ok_or_else(|| PathError::NotAnArray(path.to_string()))?;
    if index < arr.len() {
        arr.remove(index);
    }
    Ok(next)
}

fn nested_list<'a>(
    doc: &'a mut Value,
    path: &str,
    index: usize,
    field: &str,
) -> Result<Option<&'a mut Vec<Value>>, PathError> {
    let parts = segments(path)?;
    let arr = get_mut(doc, &parts, path)?
        .as_array_mut()
        .ok_or_else(|| PathError::NotAnArray(path.to_string()))?;
    let Some(item) = arr.get_mut(index) else {
        return Ok(None);
    };
    let obj = item
        .as_object_mut()
        .ok_or_else(|| PathError::NotAnObject(path.to_string()))?;
    let slot = obj.entry(field.to_string()).or_insert(Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    Ok(slot.as_array_mut())
}

/// Append an empty string to `path[index].field` — the per-row feature
/// lists on accessories and industries. Out-of-bounds row indices are
/// no-ops.
pub fn append_nested_string(doc: &Value, path: &str, index: usize, field: &str) -> Result<Value, PathError> {
    let mut next = doc.clone();
    if let Some(list) = nested_list(&mut next, path, index, field)? {
        list.push(Value::String(String::new()));
    }
    Ok(next)
}

/// Replace `path[index].field[item_index]` with `value`.
pub fn update_nested_string(
    doc: &Value,
    path: &str,
    index: usize,
    field: &str,
    item_index: usize,
    value: &str,
) -> Result<Value, PathError> {
    let mut next = doc.clone();
    if let Some(list) = nested_list(&mut next, path, index, field)? {
        if let Some(item) = list.get_mut(item_index) {
            *item = Value::String(value.to_string());
        }
    }
    Ok(next)
}

/// Remove `path[index].field[item_index]`.
pub fn remove_nested_string(
    doc: &Value,
    path: &str,
    index: usize,
    field: &str,
    item_index: usize,
) -> Result<Value, PathError> {
    let mut next = doc.clone();
    if let Some(list) = nested_list(&mut next, path, index, field)? {
        if item_index < list.len() {
            list.remove(item_index);
        }
    }
    Ok(next)
}
