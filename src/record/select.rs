//! Bounded newest-first selection
//!
//! The source dataset carries no timestamps, so "newest" means highest
//! identifier. Selection must stay identifier-based; nothing here infers an
//! ordering from any other field.

use std::cmp::Reverse;

/// Returns at most `n` items, ordered by descending identifier
///
/// `id_of` extracts the identifier; items where it returns `None` are dropped.
/// Normalized records always carry an id, but the function does not assume its
/// input went through validation. The sort is stable, so items with equal ids
/// keep their input order run-to-run.
pub fn select_top_by_id<T, F>(items: Vec<T>, n: usize, id_of: F) -> Vec<T>
where
    F: Fn(&T) -> Option<u64>,
{
    let mut keyed: Vec<(u64, T)> = items
        .into_iter()
        .filter_map(|item| id_of(&item).map(|id| (id, item)))
        .collect();

    keyed.sort_by_key(|entry| Reverse(entry.0));
    keyed.truncate(n);
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;
    use serde_json::{json, Value};

    fn raw_with_id(id: Value) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("id".to_string(), id);
        record
    }

    fn record_id(record: &RawRecord) -> Option<u64> {
        record.get("id").and_then(Value::as_u64)
    }

    #[test]
    fn test_selects_top_n_descending() {
        let items: Vec<RawRecord> = (10..=16).map(|id| raw_with_id(json!(id))).collect();

        let selected = select_top_by_id(items, 5, record_id);

        let ids: Vec<u64> = selected.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec![16, 15, 14, 13, 12]);
    }

    #[test]
    fn test_returns_fewer_when_input_is_smaller() {
        let items = vec![raw_with_id(json!(1)), raw_with_id(json!(2))];

        let selected = select_top_by_id(items, 5, record_id);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_drops_items_without_valid_id() {
        let items = vec![
            raw_with_id(json!(3)),
            raw_with_id(json!("nope")),
            raw_with_id(json!(true)),
            raw_with_id(json!(null)),
            raw_with_id(json!(7)),
        ];

        let selected = select_top_by_id(items, 10, record_id);

        let ids: Vec<u64> = selected.iter().filter_map(record_id).collect();
        assert_eq!(ids, vec![7, 3]);
    }

    #[test]
    fn test_equal_ids_keep_input_order() {
        let mut a = raw_with_id(json!(5));
        a.insert("tag".to_string(), json!("first"));
        let mut b = raw_with_id(json!(5));
        b.insert("tag".to_string(), json!("second"));

        let selected = select_top_by_id(vec![a, b], 2, record_id);

        assert_eq!(selected[0].get("tag"), Some(&json!("first")));
        assert_eq!(selected[1].get("tag"), Some(&json!("second")));
    }

    #[test]
    fn test_zero_bound_returns_empty() {
        let items = vec![raw_with_id(json!(1))];
        assert!(select_top_by_id(items, 0, record_id).is_empty());
    }

    #[test]
    fn test_result_is_a_subset_of_input() {
        let items: Vec<RawRecord> = [4u64, 9, 2, 9, 1]
            .iter()
            .map(|id| raw_with_id(json!(id)))
            .collect();
        let input = items.clone();

        let selected = select_top_by_id(items, 3, record_id);

        assert_eq!(selected.len(), 3);
        for item in &selected {
            assert!(input.contains(item));
        }
    }

    #[test]
    fn test_works_over_normalized_records() {
        use crate::record::Post;

        let posts: Vec<Post> = (1..=4)
            .map(|id| Post {
                id,
                user_id: 2,
                title: format!("post {}", id),
            })
            .collect();

        let selected = select_top_by_id(posts, 2, |p| Some(p.id));

        let ids: Vec<u64> = selected.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }
}
