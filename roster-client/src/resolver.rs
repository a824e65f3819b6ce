//! Relationship resolver
//!
//! Joins selected identifiers against an independently fetched option list.
//! Identifiers are compared as [`RecordId`], never as raw text.

use shared::{Record, RecordId};
use std::collections::HashSet;

/// Full option records for the selected `tokens`, in token order.
///
/// Tokens are normalized with [`RecordId::parse_token`]. Tokens that do not
/// parse or match no option are dropped; repeated tokens count once.
pub fn resolve_selection<R, I, T>(options: &[R], tokens: I) -> Vec<R>
where
    R: Record,
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let ids = tokens
        .into_iter()
        .filter_map(|token| RecordId::parse_token(token.as_ref()));
    resolve_ids(options, ids)
}

/// Same join for ids that are already normalized
pub fn resolve_ids<R: Record>(options: &[R], ids: impl IntoIterator<Item = RecordId>) -> Vec<R> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .filter_map(|id| options.iter().find(|option| option.id() == id).cloned())
        .collect()
}

/// Re-key records held by a parent (possibly stale or partial copies)
/// against the authoritative option list.
pub fn reconcile_selection<R: Record>(options: &[R], held: &[R]) -> Vec<R> {
    resolve_ids(options, held.iter().map(Record::id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Department;

    fn department(id: i64, name: &str) -> Department {
        Department {
            id: RecordId(id),
            name: name.to_string(),
            location: "HQ".to_string(),
        }
    }

    fn options() -> Vec<Department> {
        vec![department(1, "Sales"), department(2, "R&D"), department(3, "Support")]
    }

    #[test]
    fn test_follows_token_order() {
        let selected = resolve_selection(&options(), ["3", "1"]);
        let names: Vec<_> = selected.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Support", "Sales"]);
    }

    #[test]
    fn test_unknown_and_malformed_tokens_dropped() {
        let selected = resolve_selection(&options(), ["2", "99", "", "abc"]);
        assert_eq!(selected, vec![department(2, "R&D")]);
    }

    #[test]
    fn test_tokens_normalized_before_matching() {
        let selected = resolve_selection(&options(), [" 2", "02", "2.0"]);
        assert_eq!(selected, vec![department(2, "R&D")]);
    }

    #[test]
    fn test_idempotent() {
        let tokens = vec!["1".to_string(), "3".to_string()];
        let first = resolve_selection(&options(), &tokens);
        let second = resolve_selection(&options(), &tokens);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reconcile_replaces_stale_copies() {
        let held = vec![
            Department {
                id: RecordId(2),
                name: String::new(),
                location: String::new(),
            },
            department(7, "Closed"),
        ];
        assert_eq!(reconcile_selection(&options(), &held), vec![department(2, "R&D")]);
    }
}
