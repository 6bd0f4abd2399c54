//! Free-text search over shows and episodes.
//!
//! All matching is a case-insensitive substring test. Filtering always runs
//! over the complete list handed in and returns a new vector in source order.

use crate::types::{Episode, Show};

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn summary_contains(summary: Option<&str>, needle_lower: &str) -> bool {
    summary.is_some_and(|s| contains(s, needle_lower))
}

/// Whether `term` occurs in the show's name, one of its genres, or its summary.
pub fn show_matches(show: &Show, term: &str) -> bool {
    let term = term.to_lowercase();
    contains(&show.name, &term)
        || show.genres.iter().any(|g| contains(g, &term))
        || summary_contains(show.summary.as_deref(), &term)
}

/// Whether `term` occurs in the episode's name or summary.
pub fn episode_matches(episode: &Episode, term: &str) -> bool {
    let term = term.to_lowercase();
    contains(&episode.name, &term) || summary_contains(episode.summary.as_deref(), &term)
}

/// Shows matching `term`, in source order.
pub fn filter_shows(shows: &[Show], term: &str) -> Vec<Show> {
    shows
        .iter()
        .filter(|s| show_matches(s, term))
        .cloned()
        .collect()
}

/// Episodes matching `term`, in source order.
pub fn filter_episodes(episodes: &[Episode], term: &str) -> Vec<Episode> {
    episodes
        .iter()
        .filter(|e| episode_matches(e, term))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EpisodeId, Rating, ShowId};
    use proptest::prelude::*;

    fn show(id: u64, name: &str, genres: &[&str], summary: Option<&str>) -> Show {
        Show {
            id: ShowId(id),
            name: name.to_string(),
            image: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            status: "Ended".to_string(),
            rating: Rating::default(),
            runtime: None,
            summary: summary.map(str::to_string),
        }
    }

    fn episode(id: u64, name: &str, summary: Option<&str>) -> Episode {
        Episode {
            id: EpisodeId(id),
            name: name.to_string(),
            season: 1,
            number: id as u32,
            image: None,
            summary: summary.map(str::to_string),
            url: String::new(),
        }
    }

    #[test]
    fn test_show_matches_name_case_insensitive() {
        let s = show(1, "Breaking Bad", &[], None);
        assert!(show_matches(&s, "breaking"));
        assert!(show_matches(&s, "BAD"));
        assert!(!show_matches(&s, "good"));
    }

    #[test]
    fn test_show_matches_genre() {
        let s = show(1, "Fargo", &["Crime", "Drama"], None);
        assert!(show_matches(&s, "crim"));
        assert!(!show_matches(&s, "comedy"));
    }

    #[test]
    fn test_show_matches_summary_and_absent_summary() {
        let with = show(1, "Lost", &[], Some("<p>Survivors of a plane crash</p>"));
        let without = show(2, "Lost", &[], None);
        assert!(show_matches(&with, "plane"));
        assert!(!show_matches(&without, "plane"));
    }

    #[test]
    fn test_episode_matches_name_or_summary() {
        let e = episode(1, "Pilot", Some("The island awakens."));
        assert!(episode_matches(&e, "pil"));
        assert!(episode_matches(&e, "ISLAND"));
        assert!(!episode_matches(&episode(2, "Pilot", None), "island"));
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let episodes = vec![episode(1, "A", None), episode(2, "B", None)];
        assert_eq!(filter_episodes(&episodes, "").len(), 2);
    }

    #[test]
    fn test_filter_keeps_source_untouched() {
        let shows = vec![
            show(1, "Arrow", &["Action"], None),
            show(2, "Bones", &["Crime"], None),
            show(3, "Castle", &["Crime"], None),
        ];
        let filtered = filter_shows(&shows, "crime");
        let ids: Vec<u64> = filtered.iter().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(shows.len(), 3);
    }

    fn arb_episode() -> impl Strategy<Value = Episode> {
        (0u64..1000, "[a-zA-Z ]{0,10}", prop::option::of("[a-zA-Z ]{0,20}"))
            .prop_map(|(id, name, summary)| Episode {
                id: EpisodeId(id),
                name,
                season: 1,
                number: 1,
                image: None,
                summary,
                url: String::new(),
            })
    }

    fn arb_show() -> impl Strategy<Value = Show> {
        (
            0u64..1000,
            "[a-zA-Z ]{0,10}",
            prop::collection::vec("[a-zA-Z]{0,6}", 0..3),
            prop::option::of("[a-zA-Z ]{0,20}"),
        )
            .prop_map(|(id, name, genres, summary)| Show {
                id: ShowId(id),
                name,
                image: None,
                genres,
                status: String::new(),
                rating: Rating::default(),
                runtime: None,
                summary,
            })
    }

    fn show_has_term(s: &Show, term: &str) -> bool {
        let t = term.to_lowercase();
        s.name.to_lowercase().contains(&t)
            || s.genres.iter().any(|g| g.to_lowercase().contains(&t))
            || s.summary.as_ref().is_some_and(|x| x.to_lowercase().contains(&t))
    }

    proptest! {
        #[test]
        fn prop_filter_shows_membership(shows in prop::collection::vec(arb_show(), 0..20), term in "[a-zA-Z]{0,3}") {
            let result = filter_shows(&shows, &term);
            for s in &result {
                prop_assert!(show_has_term(s, &term));
            }
            let excluded = shows.iter().filter(|s| !show_has_term(s, &term)).count();
            prop_assert_eq!(result.len() + excluded, shows.len());
        }

        #[test]
        fn prop_filter_episodes_is_ordered_subsequence(episodes in prop::collection::vec(arb_episode(), 0..20), term in "[a-zA-Z]{0,3}") {
            let result = filter_episodes(&episodes, &term);
            let mut source = episodes.iter();
            for e in &result {
                prop_assert!(source.any(|x| x == e));
            }
            let expected = episodes.iter().filter(|e| episode_matches(e, &term)).count();
            prop_assert_eq!(result.len(), expected);
        }
    }
}
