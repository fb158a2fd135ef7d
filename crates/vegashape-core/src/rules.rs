//! Ordered envelope-unwrap rules and their best-effort application
//!
//! The binary codec represents every polymorphic field as a single-key
//! envelope object naming the concrete variant. Go's JSON serialization of
//! the same messages flattens those envelopes away, so comparing the two
//! shapes needs the envelope level stripped at a fixed list of paths.
//!
//! Rule order is significant: later rules run on the output of earlier ones
//! (two rules target `**.changes` with different envelope keys, and the
//! first one to find its key wins).

use serde_json::Value;
use tracing::debug;

use crate::path::{PathPattern, rewrite};
use crate::result::{Result, ResultExt};

/// One envelope-unwrap rule: strip the `envelope_key` level at every
/// position matching `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub path: String,
    pub envelope_key: String,
}

impl Rule {
    pub fn new(path: impl Into<String>, envelope_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            envelope_key: envelope_key.into(),
        }
    }
}

/// The fixed rule set that makes codec round-trip output match the Go wire
/// shape. Order matters; do not sort.
pub fn go_wire_rules() -> Vec<Rule> {
    [
        ("batchProposalSubmission.terms.changes", "change"),
        ("proposalSubmission.terms.change", "change"),
        ("proposalSubmission.terms", "change"),
        ("withdrawSubmission.ext", "ext"),
        ("**.updateAsset.changes", "source"),
        ("**.newAsset.changes", "source"),
        ("transfer", "kind"),
        ("chainEvent", "event"),
        ("**.changes.instrument", "product"),
        ("**.changes", "riskParameters"),
        ("**.changes", "change"),
        ("**.fallsBelow", "trigger"),
        ("**.newTransfer.changes", "kind"),
        ("**.risesAbove", "trigger"),
        ("**.trigger", "trigger"),
        ("**.value", "value"),
        ("**", "sourceType"),
    ]
    .into_iter()
    .map(|(path, key)| Rule::new(path, key))
    .collect()
}

/// Apply `rules` in order, each operating on the output of the previous.
///
/// A rule that fails to evaluate (interactive editing frequently feeds this
/// partial or malformed documents) is skipped: the tree from before that
/// rule is carried forward and the next rule proceeds.
pub fn apply_rules(tree: &Value, rules: &[Rule]) -> Value {
    rules.iter().fold(tree.clone(), |current, rule| {
        apply_rule(&current, rule)
            .log_and_continue()
            .unwrap_or(current)
    })
}

fn apply_rule(tree: &Value, rule: &Rule) -> Result<Value> {
    let pattern: PathPattern = rule.path.parse()?;
    debug!(path = %rule.path, key = %rule.envelope_key, "applying rule");
    Ok(rewrite(tree, &pattern, &rule.envelope_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fixed_rule_set_order() {
        let rules = go_wire_rules();
        assert_eq!(rules.len(), 17);
        assert_eq!(rules[0], Rule::new("batchProposalSubmission.terms.changes", "change"));
        assert_eq!(rules[6], Rule::new("transfer", "kind"));
        assert_eq!(rules[16], Rule::new("**", "sourceType"));
    }

    #[test]
    fn test_transfer_kind_unwrap() {
        let tree = json!({"transfer": {"kind": {"oneOff": {"amount": "100"}}}});
        let out = apply_rules(&tree, &go_wire_rules());
        assert_eq!(out, json!({"transfer": {"oneOff": {"amount": "100"}}}));
    }

    #[test]
    fn test_order_sensitivity_on_changes() {
        // riskParameters is tried before change at `**.changes`; swapping
        // the two rules changes the outcome on a doubly wrapped value.
        let tree = json!({
            "updateMarket": {"changes": {"riskParameters": {"change": {"simple": {}}}}}
        });
        let risk_first = [
            Rule::new("**.changes", "riskParameters"),
            Rule::new("**.changes", "change"),
        ];
        let change_first = [
            Rule::new("**.changes", "change"),
            Rule::new("**.changes", "riskParameters"),
        ];
        let a = apply_rules(&tree, &risk_first);
        let b = apply_rules(&tree, &change_first);
        assert_eq!(a, json!({"updateMarket": {"changes": {"simple": {}}}}));
        // change-first leaves the riskParameters envelope for the second
        // rule, which then exposes the inner change envelope untouched
        assert_eq!(
            b,
            json!({"updateMarket": {"changes": {"change": {"simple": {}}}}})
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_bad_rule_is_skipped() {
        let tree = json!({"transfer": {"kind": {"oneOff": {}}}});
        let rules = [
            Rule::new("", "broken"),
            Rule::new("transfer", "kind"),
        ];
        let out = apply_rules(&tree, &rules);
        assert_eq!(out, json!({"transfer": {"oneOff": {}}}));
    }

    #[test]
    fn test_rules_are_referentially_transparent() {
        let tree = json!({"chainEvent": {"event": {"builtin": {"deposit": {}}}}});
        let rules = go_wire_rules();
        assert_eq!(apply_rules(&tree, &rules), apply_rules(&tree, &rules));
    }
}
