// "Did you mean" hints for catalog misses

#[cfg(feature = "suggest")]
use fuzzy_matcher::{clangd::ClangdMatcher, FuzzyMatcher};

/// Best `limit` fuzzy matches for `query` among `candidates`, best first, no repeats.
#[cfg(feature = "suggest")]
pub fn suggestions(query: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let query = query.trim();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let matcher = ClangdMatcher::default();
    let mut scored: Vec<(i64, &String)> = candidates
        .iter()
        .filter_map(|candidate| {
            // try both directions: a typo'd query with extra letters only matches in reverse
            let forward = matcher.fuzzy_match(candidate, query);
            let reverse = matcher.fuzzy_match(query, candidate);
            forward.max(reverse).map(|score| (score, candidate))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let mut picked: Vec<String> = Vec::new();
    for (_, candidate) in scored {
        if picked.len() == limit {
            break;
        }
        if !picked.contains(candidate) {
            picked.push(candidate.clone());
        }
    }
    picked
}

#[cfg(not(feature = "suggest"))]
pub fn suggestions(_query: &str, _candidates: &[String], _limit: usize) -> Vec<String> {
    Vec::new()
}

#[cfg(all(test, feature = "suggest"))]
mod tests {
    use super::*;

    fn titles() -> Vec<String> {
        ["Fire", "The Thief", "Rolling in the Deep", "Fire"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_suggests_close_titles() {
        let hints = suggestions("thief", &titles(), 3);
        assert_eq!(hints.first().map(String::as_str), Some("The Thief"));
    }

    #[test]
    fn test_typo_with_extra_letter() {
        let hints = suggestions("Fiire", &titles(), 3);
        assert!(hints.contains(&"Fire".to_string()));
    }

    #[test]
    fn test_no_duplicates_and_limit() {
        let hints = suggestions("fire", &titles(), 5);
        assert_eq!(hints.iter().filter(|h| *h == "Fire").count(), 1);
        assert!(suggestions("fire", &titles(), 0).is_empty());
        assert!(suggestions("   ", &titles(), 3).is_empty());
    }
}
