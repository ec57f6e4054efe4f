//! Response normalizer.
//!
//! The backend wraps payloads in envelopes whose shape varies by endpoint:
//! `[..]`, `{data: [..]}`, `{data: {data: [..]}}`, `{data: {jobs: [..]}}`,
//! `{success, data: {data: {users: [..]}, total}}` and so on. Every response
//! crosses this boundary before the rest of the client looks at it. None of
//! these functions fail: malformed input degrades to empty defaults.

mod envelope;
mod numbers;

pub use crate::settings::normalize_settings;
pub use numbers::numeric;

use serde_json::{Map, Value};

use crate::pagination::PaginatedResult;
use crate::resource::{ResourceRecord, ResourceType};
use envelope::{containers, deepest_array, meta_lookup};
use numbers::{non_negative, positive};

/// Normalize a list envelope into a [`PaginatedResult`].
///
/// `requested_page` is used when the envelope does not say which page it is;
/// `page_size` is the fallback divisor for deriving `total_pages`.
pub fn normalize_page(
    value: &Value,
    collection_key: &str,
    requested_page: u32,
    page_size: u32,
) -> PaginatedResult<ResourceRecord> {
    let chain = containers(value);
    let found = deepest_array(value, &chain, Some(collection_key));

    let (items, meta_depth) = match found {
        Some((array, depth)) => (records_from(array), depth),
        None => (Vec::new(), chain.len().saturating_sub(1)),
    };

    let meta_chain = &chain[..chain.len().min(meta_depth + 1)];
    let item_count = items.len() as u64;

    let total = meta_lookup(meta_chain, &["total", "totalCount", "count"], non_negative)
        .unwrap_or(if found.is_some() && meta_chain.is_empty() {
            item_count
        } else {
            0
        });
    let page = meta_lookup(meta_chain, &["page", "currentPage"], positive)
        .map(|p| p.min(u32::MAX as u64) as u32)
        .unwrap_or_else(|| requested_page.max(1));
    let limit = meta_lookup(meta_chain, &["limit", "pageSize", "perPage"], positive)
        .or_else(|| (page_size > 0).then_some(page_size as u64));
    let total_pages = meta_lookup(meta_chain, &["totalPages", "total_pages", "pages"], positive)
        .or_else(|| limit.map(|l| total.div_ceil(l)))
        .unwrap_or(1)
        .clamp(1, u32::MAX as u64) as u32;

    PaginatedResult {
        items,
        total,
        page,
        total_pages,
    }
}

/// Normalize a response that carries a whole list, for a resource type.
///
/// Used for categories and skills, which the backend does not paginate.
pub fn normalize_unpaged(value: &Value, resource: ResourceType) -> PaginatedResult<ResourceRecord> {
    let items = records_from(&normalize_list(value, Some(resource.collection_key())));
    PaginatedResult::single_page(items)
}

/// The deepest array in the envelope, or an empty list.
pub fn normalize_list(value: &Value, collection_key: Option<&str>) -> Vec<Value> {
    let chain = containers(value);
    deepest_array(value, &chain, collection_key)
        .map(|(array, _)| array.to_vec())
        .unwrap_or_default()
}

/// Unwrap `data` / `data.data` down to the innermost object. Non-objects become `{}`.
pub fn normalize_object(value: &Value) -> Map<String, Value> {
    containers(value)
        .last()
        .map(|obj| (*obj).clone())
        .unwrap_or_default()
}

/// Single record envelope, e.g. `{data: {...}}` or `{data: {job: {...}}}`.
pub fn normalize_record(value: &Value, resource: ResourceType) -> Option<ResourceRecord> {
    let chain = containers(value);
    for obj in chain.iter().rev() {
        if obj.contains_key("id") {
            return ResourceRecord::from_value(&Value::Object((*obj).clone()));
        }
        if let Some(inner) = obj.get(resource.singular()) {
            if let Some(record) = ResourceRecord::from_value(inner) {
                return Some(record);
            }
        }
    }
    None
}

fn records_from(array: &[Value]) -> Vec<ResourceRecord> {
    let records: Vec<ResourceRecord> = array.iter().filter_map(ResourceRecord::from_value).collect();
    #[cfg(feature = "tracing")]
    if records.len() < array.len() {
        tracing::debug!(
            dropped = array.len() - records.len(),
            "dropped list items without a usable id"
        );
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jobs(n: usize) -> Vec<Value> {
        (0..n).map(|i| json!({"id": format!("job-{i}")})).collect()
    }

    #[test]
    fn test_array_at_root() {
        let page = normalize_page(&json!(jobs(3)), "jobs", 1, 10);
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_array_at_data_with_meta() {
        let body = json!({"data": jobs(10), "total": 12, "page": 1, "limit": 10, "totalPages": 2});
        let page = normalize_page(&body, "jobs", 1, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_array_at_data_data() {
        let body = json!({"success": true, "data": {"data": jobs(2), "total": 12, "page": 2, "totalPages": 2}});
        let page = normalize_page(&body, "jobs", 2, 10);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, 12);
    }

    #[test]
    fn test_array_under_resource_name() {
        let body = json!({"data": {"data": {"applications": [{"id": "a1"}], "total": "1"}}});
        let page = normalize_page(&body, "applications", 1, 10);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_deepest_array_wins() {
        let body = json!({
            "data": {
                "data": {"jobs": [{"id": "deep"}]},
                "jobs": [{"id": "shallow-1"}, {"id": "shallow-2"}]
            }
        });
        let page = normalize_page(&body, "jobs", 1, 10);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id.as_str(), "deep");
    }

    #[test]
    fn test_absent_array_defaults() {
        for body in [
            json!(null),
            json!("oops"),
            json!(42),
            json!({}),
            json!({"data": null}),
            json!({"data": {"data": {"jobs": "not a list"}}}),
        ] {
            let page = normalize_page(&body, "jobs", 3, 10);
            assert!(page.items.is_empty(), "body: {body}");
            assert_eq!(page.total, 0);
            assert_eq!(page.page, 3);
            assert_eq!(page.total_pages, 1);
        }
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let body = json!({"data": jobs(1), "total": -4, "page": "abc", "totalPages": 0});
        let page = normalize_page(&body, "jobs", 1, 10);
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_total_pages_derived_from_limit() {
        let body = json!({"data": jobs(10), "total": 25});
        let page = normalize_page(&body, "jobs", 1, 10);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_items_without_id_are_dropped() {
        let body = json!({"data": [{"id": "a"}, {"name": "no id"}, 5, null]});
        let page = normalize_page(&body, "jobs", 1, 10);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn test_unpaged_categories() {
        let body = json!({"data": {"categories": [{"id": "c1", "name": "Hospitality"}, {"id": "c2"}]}});
        let page = normalize_unpaged(&body, ResourceType::Categories);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_normalize_object_unwraps() {
        let stats = normalize_object(&json!({"success": true, "data": {"totalUsers": 4}}));
        assert_eq!(stats.get("totalUsers"), Some(&json!(4)));
        assert!(normalize_object(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_normalize_record_shapes() {
        let direct = normalize_record(&json!({"data": {"id": "j1", "title": "Chef"}}), ResourceType::Jobs);
        assert_eq!(direct.map(|r| r.id.into_inner()), Some("j1".to_string()));

        let named = normalize_record(&json!({"data": {"job": {"id": "j2"}}}), ResourceType::Jobs);
        assert_eq!(named.map(|r| r.id.into_inner()), Some("j2".to_string()));

        assert!(normalize_record(&json!({"data": {}}), ResourceType::Jobs).is_none());
    }
}
