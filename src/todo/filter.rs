use super::{TodoItem, TodoList};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which subset of the list is visible. Display only, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Completed];

    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => !item.completed,
            FilterMode::Completed => item.completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All",
            FilterMode::Active => "Active",
            FilterMode::Completed => "Completed",
        }
    }

    /// Cycle: All -> Active -> Completed -> All
    pub fn next(self) -> FilterMode {
        match self {
            FilterMode::All => FilterMode::Active,
            FilterMode::Active => FilterMode::Completed,
            FilterMode::Completed => FilterMode::All,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Active => write!(f, "active"),
            FilterMode::Completed => write!(f, "completed"),
        }
    }
}

impl FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "active" => Ok(FilterMode::Active),
            "completed" | "done" => Ok(FilterMode::Completed),
            _ => Err(format!("Invalid filter: {}", s)),
        }
    }
}

/// Visible items for `mode`, in list order.
pub fn apply(list: &TodoList, mode: FilterMode) -> Vec<&TodoItem> {
    list.items.iter().filter(|item| mode.matches(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn sample_list() -> TodoList {
        let mut list = TodoList::new();
        for (i, text) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            list.add_at(text, Utc.timestamp_millis_opt(i as i64 + 1).unwrap());
        }
        // list is [E, D, C, B, A]; complete D and B
        let d = list.items[1].id;
        let b = list.items[3].id;
        list.toggle(d);
        list.toggle(b);
        list
    }

    fn texts(items: &[&TodoItem]) -> Vec<String> {
        items.iter().map(|item| item.text.clone()).collect()
    }

    #[test]
    fn test_all_keeps_everything_in_order() {
        let list = sample_list();
        assert_eq!(texts(&apply(&list, FilterMode::All)), vec!["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn test_active_and_completed_preserve_order() {
        let list = sample_list();
        assert_eq!(texts(&apply(&list, FilterMode::Active)), vec!["E", "C", "A"]);
        assert_eq!(texts(&apply(&list, FilterMode::Completed)), vec!["D", "B"]);
    }

    #[test]
    fn test_active_and_completed_partition_all() {
        let list = sample_list();
        let active: HashSet<i64> = apply(&list, FilterMode::Active).iter().map(|i| i.id).collect();
        let completed: HashSet<i64> = apply(&list, FilterMode::Completed).iter().map(|i| i.id).collect();
        let all: HashSet<i64> = apply(&list, FilterMode::All).iter().map(|i| i.id).collect();

        assert!(active.is_disjoint(&completed));
        assert_eq!(active.union(&completed).copied().collect::<HashSet<_>>(), all);
    }

    #[test]
    fn test_clear_completed_empties_completed_view() {
        let mut list = sample_list();
        list.clear_completed();
        assert!(apply(&list, FilterMode::Completed).is_empty());
    }

    #[test]
    fn test_empty_list() {
        let list = TodoList::new();
        for mode in FilterMode::ALL {
            assert!(apply(&list, mode).is_empty());
        }
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(FilterMode::All.next(), FilterMode::Active);
        assert_eq!(FilterMode::Active.next(), FilterMode::Completed);
        assert_eq!(FilterMode::Completed.next(), FilterMode::All);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("all".parse::<FilterMode>().unwrap(), FilterMode::All);
        assert_eq!("Active".parse::<FilterMode>().unwrap(), FilterMode::Active);
        assert_eq!("completed".parse::<FilterMode>().unwrap(), FilterMode::Completed);
        assert!("pending".parse::<FilterMode>().is_err());
    }

    #[test]
    fn test_default_is_all() {
        assert_eq!(FilterMode::default(), FilterMode::All);
    }
}
