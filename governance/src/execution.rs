//! Execution of approved proposals.
//!
//! Each proposal kind runs as its own store mutation so a failure in one
//! step cannot leave the audit trail disagreeing with the applied state:
//! the audit entry is appended in the same step as the mutation it records.

use crate::error::GovernanceError;
use poh_store::{
    AuditEntry, AuditLog, ContentStore, ProfileStore, Proposal, ProposalAction, RuleStore,
};
use poh_types::{ContentKind, ContentRef, Timestamp};

/// Apply an approved proposal's action to the platform.
pub fn execute(
    proposal: &Proposal,
    content: &dyn ContentStore,
    profiles: &dyn ProfileStore,
    rules: &dyn RuleStore,
    audit: &dyn AuditLog,
    now: Timestamp,
) -> Result<(), GovernanceError> {
    match &proposal.action {
        ProposalAction::CommunityUpdate { community, patch } => {
            let target = ContentRef::new(ContentKind::Community, community.clone());
            let before = content
                .fetch_summary(&target)?
                .map(|s| s.snapshot)
                .unwrap_or(serde_json::Value::Null);
            content.patch(&target, patch)?;
            audit.append(AuditEntry {
                action: "community_update".into(),
                actor: Some(proposal.author.clone()),
                subject: community.to_string(),
                before,
                after: patch.clone(),
                at: now,
            })?;
        }
        ProposalAction::CommunityDissolution { community } => {
            let target = ContentRef::new(ContentKind::Community, community.clone());
            let before = content
                .fetch_summary(&target)?
                .map(|s| s.snapshot)
                .unwrap_or(serde_json::Value::Null);
            content.remove(&target)?;
            audit.append(AuditEntry {
                action: "community_dissolution".into(),
                actor: Some(proposal.author.clone()),
                subject: community.to_string(),
                before,
                after: serde_json::Value::Null,
                at: now,
            })?;
        }
        ProposalAction::FundAllocation { recipient, amount } => {
            profiles.add_credits(recipient, *amount as i64)?;
        }
        ProposalAction::RuleChange { rule, new_value } => {
            let mut params = rules.params()?;
            let before = serde_json::json!({ rule.name(): params.value_of(*rule) });
            params.apply(*rule, *new_value);
            rules.put_params(&params)?;
            audit.append(AuditEntry {
                action: "rule_change".into(),
                actor: Some(proposal.author.clone()),
                subject: rule.name().into(),
                before,
                after: serde_json::json!({ rule.name(): *new_value }),
                at: now,
            })?;
        }
        // Approved-only kinds carry no machine-executable effect.
        ProposalAction::Feature { .. } | ProposalAction::Partnership { .. } => {}
    }
    Ok(())
}
