//! Country-preference ranking of search candidates.
//!
//! A stable two-bucket partition, not a relevance ranking: candidates that
//! match the country hint come first, everyone else after, catalog order
//! preserved within each bucket, truncated to the display limit.

use crate::types::Candidate;

/// Rank a candidate list against an optional country hint and truncate to
/// `display_limit`. Without a hint the list passes through in server order.
pub fn rank_candidates(
    candidates: Vec<Candidate>,
    country_hint: Option<&str>,
    display_limit: usize,
) -> Vec<Candidate> {
    let hint = country_hint
        .map(|h| h.trim().to_lowercase())
        .filter(|h| !h.is_empty());

    let mut ranked = match hint {
        Some(hint) => {
            let (mut matches, others): (Vec<_>, Vec<_>) = candidates
                .into_iter()
                .partition(|c| matches_country(c, &hint));
            matches.extend(others);
            matches
        }
        None => candidates,
    };

    ranked.truncate(display_limit);
    ranked
}

/// A candidate matches if its free-text country list contains the hint, or
/// any of its normalized tags overlaps the hint in either direction
/// (tags look like "en:poland", so both containment checks are needed).
fn matches_country(candidate: &Candidate, hint_lower: &str) -> bool {
    if candidate.countries.to_lowercase().contains(hint_lower) {
        return true;
    }

    candidate.countries_tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        hint_lower.contains(&tag) || tag.contains(hint_lower)
    })
}
