//! Alphabetical ordering of shows.
//!
//! Names are compared with the Unicode Collation Algorithm for the root
//! locale at secondary strength: letters order by their base form ("Ł" next
//! to "L", "Ø" next to "O"), accents break ties and case is ignored.

use crate::types::Show;
use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use log::warn;
use std::cmp::Ordering;

/// Build the collator used for show names.
///
/// Returns `None` if the collation data cannot be loaded.
pub fn name_collator() -> Option<CollatorBorrowed<'static>> {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Secondary);
    match Collator::try_new(Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!("Collation data unavailable, falling back to lower-case order: {}", e);
            None
        }
    }
}

/// Compare two names in catalog order.
///
/// ```
/// use std::cmp::Ordering;
/// use tv_browser::sort::{compare_names, name_collator};
///
/// let collator = name_collator();
/// assert_eq!(compare_names(collator.as_ref(), "Łowcy", "Zorro"), Ordering::Less);
/// assert_eq!(compare_names(collator.as_ref(), "lost", "LOST"), Ordering::Equal);
/// ```
pub fn compare_names(collator: Option<&CollatorBorrowed<'_>>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Sort shows by name in place. The sort is stable.
pub fn sort_shows(shows: &mut [Show]) {
    let collator = name_collator();
    shows.sort_by(|a, b| compare_names(collator.as_ref(), &a.name, &b.name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rating, ShowId};
    use proptest::prelude::*;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id: ShowId(id),
            name: name.to_string(),
            image: None,
            genres: Vec::new(),
            status: String::new(),
            rating: Rating::default(),
            runtime: None,
            summary: None,
        }
    }

    fn names(shows: &[Show]) -> Vec<&str> {
        shows.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut shows = vec![show(1, "banshee"), show(2, "Arrow"), show(3, "arrested")];
        sort_shows(&mut shows);
        assert_eq!(names(&shows), vec!["arrested", "Arrow", "banshee"]);
    }

    #[test]
    fn test_sort_accents_near_plain_letters() {
        let mut shows = vec![show(1, "Zoo"), show(2, "Érik"), show(3, "Dexter"), show(4, "Fargo")];
        sort_shows(&mut shows);
        assert_eq!(names(&shows), vec!["Dexter", "Érik", "Fargo", "Zoo"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut shows = vec![show(1, "Lost"), show(2, "Lost"), show(3, "Alias")];
        sort_shows(&mut shows);
        let ids: Vec<u64> = shows.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_letters_without_decomposition() {
        let mut shows = vec![
            show(1, "Zorro"),
            show(2, "Łowcy"),
            show(3, "Ørnen"),
            show(4, "Lost"),
            show(5, "Oz"),
        ];
        sort_shows(&mut shows);
        assert_eq!(names(&shows), vec!["Lost", "Łowcy", "Ørnen", "Oz", "Zorro"]);
    }

    #[test]
    fn test_compare_names_ignores_case_not_accents() {
        let collator = name_collator();
        assert_eq!(compare_names(collator.as_ref(), "ÅNGEL", "ångel"), Ordering::Equal);
        assert_ne!(compare_names(collator.as_ref(), "Erik", "Érik"), Ordering::Equal);
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(list in prop::collection::vec("[a-zA-ZéÉèçÇ ]{0,8}", 0..20)) {
            let mut once: Vec<Show> = list
                .iter()
                .enumerate()
                .map(|(i, n)| show(i as u64, n))
                .collect();
            sort_shows(&mut once);
            let mut twice = once.clone();
            sort_shows(&mut twice);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_sort_ignores_case(list in prop::collection::vec("[a-zA-Z]{1,6}", 0..20)) {
            let mut shows: Vec<Show> = list
                .iter()
                .enumerate()
                .map(|(i, n)| show(i as u64, n))
                .collect();
            sort_shows(&mut shows);
            for pair in shows.windows(2) {
                prop_assert!(pair[0].name.to_lowercase() <= pair[1].name.to_lowercase());
            }
        }
    }
}
