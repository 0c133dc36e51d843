//! Merging candidate rules from all chunks

use rulesmith_domain::{Rule, RuleSet};
use tracing::debug;

/// Merge candidate rules into a `RuleSet`
///
/// Keeps the first rule for each case-folded `rule` text, in input order,
/// along with its `rule_id` and `suggested_fix`. Rules without text are
/// dropped silently.
pub fn dedupe<I>(rules: I) -> RuleSet
where
    I: IntoIterator<Item = Rule>,
{
    let mut set = RuleSet::new();
    let mut dropped = 0usize;

    for rule in rules {
        if !set.insert(rule) {
            dropped += 1;
        }
    }

    debug!("Deduplicated to {} rules ({} dropped)", set.len(), dropped);
    set
}
