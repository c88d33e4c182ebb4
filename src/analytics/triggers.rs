//! Trigger frequency ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::records::EpisodeEvent;

/// Default limit for the all-time trigger ranking view.
pub const TRIGGER_VIEW_LIMIT: usize = 10;

/// A trigger and how often it was reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerCount {
    pub trigger: String,
    pub count: u32,
}

/// Count trigger occurrences and rank them by frequency, descending.
///
/// Ties keep first-seen order: the stable sort preserves the order in
/// which tied triggers were first encountered.
pub fn rank_triggers<'a>(
    triggers: impl IntoIterator<Item = &'a str>,
    limit: usize,
) -> Vec<TriggerCount> {
    let mut ranked: Vec<TriggerCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for trigger in triggers {
        match index.get(trigger) {
            Some(&i) => ranked[i].count += 1,
            None => {
                index.insert(trigger.to_string(), ranked.len());
                ranked.push(TriggerCount {
                    trigger: trigger.to_string(),
                    count: 1,
                });
            }
        }
    }

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

/// Rank triggers across a set of episodes.
pub fn top_triggers(episodes: &[EpisodeEvent], limit: usize) -> Vec<TriggerCount> {
    rank_triggers(
        episodes
            .iter()
            .flat_map(|e| e.triggers.iter().map(String::as_str)),
        limit,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_counts_and_orders() {
        let ranked = rank_triggers(
            ["stress", "stress", "weather", "noise"].into_iter(),
            5,
        );

        assert_eq!(
            ranked,
            vec![
                TriggerCount {
                    trigger: "stress".to_string(),
                    count: 2
                },
                TriggerCount {
                    trigger: "weather".to_string(),
                    count: 1
                },
                TriggerCount {
                    trigger: "noise".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_limit_truncates() {
        let ranked = rank_triggers(["a", "b", "c", "d"].into_iter(), 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_triggers(std::iter::empty(), 5).is_empty());
    }
}
