//! Tolerant readers over untyped JSON. Wrong shapes degrade to empty values, never errors.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use crate::domain::{coerce_amount, Category, Identifiable, SubCategory};

pub fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// Numeric map with every value coerced; anything but an object reads as empty.
pub fn number_map(value: Option<&Value>) -> BTreeMap<String, f64> {
    object(value)
        .map(|map| {
            map.iter()
                .map(|(key, value)| (key.clone(), coerce_amount(value)))
                .collect()
        })
        .unwrap_or_default()
}

/// String entries of an object; non-string values are skipped.
pub fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    object(value)
        .map(|map| {
            map.iter()
                .filter_map(|(key, value)| value.as_str().map(|text| (key.clone(), text.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

pub fn string(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn amount(value: Option<&Value>) -> f64 {
    value.map(coerce_amount).unwrap_or(0.0)
}

/// Reads a category list. Returns `None` when `value` is not an array.
///
/// Entries without a usable string id are dropped, as are later entries repeating an
/// id; missing names fall back to the id.
pub fn categories(value: Option<&Value>) -> Option<Vec<Category>> {
    let items = value?.as_array()?;
    Some(first_by_id(items.iter().filter_map(category)))
}

fn category(value: &Value) -> Option<Category> {
    let (id, name) = identity(value)?;
    let sub_categories = value
        .get("subCategories")
        .and_then(Value::as_array)
        .map(|subs| first_by_id(subs.iter().filter_map(sub_category)))
        .unwrap_or_default();
    Some(Category::new(id, name).with_sub_categories(sub_categories))
}

fn sub_category(value: &Value) -> Option<SubCategory> {
    let (id, name) = identity(value)?;
    Some(SubCategory::new(id, name).with_amount(amount(value.get("amount"))))
}

fn first_by_id<T: Identifiable>(entries: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    entries
        .filter(|entry| {
            let fresh = seen.insert(entry.id().to_string());
            if !fresh {
                tracing::debug!(id = entry.id(), "dropping duplicate id in stored categories");
            }
            fresh
        })
        .collect()
}

fn identity(value: &Value) -> Option<(String, String)> {
    let id = value.get("id")?.as_str()?.trim();
    if id.is_empty() {
        return None;
    }
    let name = value
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(id)
        .to_string();
    Some((id.to_string(), name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_degrade_to_empty() {
        assert!(number_map(Some(&json!([1, 2]))).is_empty());
        assert!(number_map(None).is_empty());
        let spent = number_map(Some(&json!({"house_rent": "12.5", "car_fuel": null})));
        assert_eq!(spent["house_rent"], 12.5);
        assert_eq!(spent["car_fuel"], 0.0);
        let notes = string_map(Some(&json!({"subscriptions": "gym", "going-out": 3})));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn categories_drop_unusable_entries() {
        let raw = json!([
            {"id": "house", "name": "House", "subCategories": [
                {"id": "rent", "name": "Rent", "amount": "900"},
                {"name": "no id"},
                {"id": "gas", "amount": -4}
            ]},
            {"name": "anonymous"},
            {"id": "pets"},
            "junk"
        ]);
        let categories = categories(Some(&raw)).unwrap();
        assert_eq!(categories.len(), 2);
        let house = &categories[0];
        assert_eq!(house.sub_categories.len(), 2);
        assert_eq!(house.sub_categories[0].amount, 900.0);
        assert_eq!(house.sub_categories[1].name, "gas");
        assert_eq!(house.sub_categories[1].amount, 0.0);
        assert_eq!(categories[1].name, "pets");
        assert!(categories[1].sub_categories.is_empty());
        assert!(super::categories(Some(&json!({"id": "x"}))).is_none());
    }

    #[test]
    fn repeated_ids_keep_the_first_entry() {
        let raw = json!([
            {"id": "house", "name": "House", "subCategories": [
                {"id": "rent", "name": "Rent", "amount": 900},
                {"id": "rent", "name": "Rent again", "amount": 5}
            ]},
            {"id": "house", "name": "Second house", "subCategories": []},
            {"id": "car", "name": "Car"}
        ]);
        let categories = categories(Some(&raw)).unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "House");
        assert_eq!(categories[0].sub_categories.len(), 1);
        assert_eq!(categories[0].sub_categories[0].amount, 900.0);
        assert_eq!(categories[1].id, "car");
    }
}
