//! RuleSet module - the deduplicated result of one extraction run

use crate::rule::Rule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered collection of rules with unique case-folded `rule` text
///
/// Rules keep the order in which they were first inserted. Serializes as
/// `{"rules": [...]}`, the export format of an extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawRuleSet")]
pub struct RuleSet {
    rules: Vec<Rule>,

    #[serde(skip)]
    seen: HashSet<String>,
}

/// Wire shape used to rebuild the seen-set when deserializing
#[derive(Deserialize)]
struct RawRuleSet {
    #[serde(default)]
    rules: Vec<Rule>,
}

impl From<RawRuleSet> for RuleSet {
    fn from(raw: RawRuleSet) -> Self {
        raw.rules.into_iter().collect()
    }
}

impl RuleSet {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule unless its text is empty or already present
    ///
    /// Returns `true` if the rule was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulesmith_domain::{Rule, RuleSet};
    ///
    /// let mut set = RuleSet::new();
    /// assert!(set.insert(Rule::new("R001", "Use tabs", "")));
    /// assert!(!set.insert(Rule::new("R101", "USE TABS", "")));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, rule: Rule) -> bool {
        if !rule.has_text() {
            return false;
        }
        if !self.seen.insert(rule.dedup_key()) {
            return false;
        }
        self.rules.push(rule);
        true
    }

    /// Whether a rule with the same case-folded text is present
    pub fn contains_text(&self, text: &str) -> bool {
        self.seen.contains(&text.to_lowercase())
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in insertion order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterate over rules in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Consume the set, returning the rules in insertion order
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    /// Replace every `rule_id` with a sequential, globally unique id
    /// (`R001`, `R002`, ...) in insertion order
    pub fn renumber_ids(&mut self) {
        let width = self.rules.len().to_string().len().max(3);
        for (idx, rule) in self.rules.iter_mut().enumerate() {
            rule.rule_id = format!("R{:0width$}", idx + 1, width = width);
        }
    }
}

impl PartialEq for RuleSet {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl Eq for RuleSet {}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
