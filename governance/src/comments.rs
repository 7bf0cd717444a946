//! Proposal comment threads.
//!
//! One level of reply nesting: a reply to a reply attaches to the thread's
//! top-level comment, while the notification still goes to the author of
//! the comment actually replied to.

use crate::engine::GovernanceEngine;
use crate::error::GovernanceError;
use poh_store::{Notification, NotificationSink, ProposalComment, ProposalStore};
use poh_types::{CommentId, ProposalId, Timestamp, UserId};

impl GovernanceEngine {
    /// Add a comment or reply to a proposal's discussion thread.
    ///
    /// Notifies the proposal author and, for replies, the author of the
    /// comment replied to; the commenter is never notified of their own
    /// comment.
    pub fn create_comment(
        &self,
        proposal_id: ProposalId,
        author: &UserId,
        body: &str,
        reply_to: Option<CommentId>,
        now: Timestamp,
    ) -> Result<ProposalComment, GovernanceError> {
        let proposal = self
            .proposals
            .get_proposal(proposal_id)?
            .ok_or(GovernanceError::ProposalNotFound(proposal_id))?;

        let replied = match reply_to {
            Some(id) => Some(
                self.proposals
                    .get_comment(id)?
                    .filter(|c| c.proposal == proposal_id)
                    .ok_or(GovernanceError::CommentNotFound(id))?,
            ),
            None => None,
        };
        // Clamp to one nesting level.
        let parent = replied.as_ref().map(|c| c.parent.unwrap_or(c.id));

        let mut comment = ProposalComment {
            id: CommentId::new(0),
            proposal: proposal_id,
            author: author.clone(),
            body: body.to_string(),
            parent,
            created_at: now,
        };
        comment.id = self.proposals.add_comment(&comment)?;

        let mut recipients = Vec::new();
        if &proposal.author != author {
            recipients.push(proposal.author.clone());
        }
        if let Some(replied) = &replied {
            if &replied.author != author && !recipients.contains(&replied.author) {
                recipients.push(replied.author.clone());
            }
        }
        for recipient in recipients {
            self.notifier.notify(Notification {
                recipient,
                kind: "proposal_comment".into(),
                title: proposal.title.clone(),
                body: format!("{author} commented on the proposal"),
                data: serde_json::json!({
                    "proposal": proposal_id.value(),
                    "comment": comment.id.value(),
                }),
            });
        }

        Ok(comment)
    }

    /// The proposal's comments with replies grouped under their parents.
    ///
    /// Top-level comments keep insertion order; each is followed by its
    /// replies in insertion order.
    pub fn comments(
        &self,
        proposal_id: ProposalId,
    ) -> Result<Vec<(ProposalComment, Vec<ProposalComment>)>, GovernanceError> {
        if self.proposals.get_proposal(proposal_id)?.is_none() {
            return Err(GovernanceError::ProposalNotFound(proposal_id));
        }

        let all = self.proposals.comments_for(proposal_id)?;
        let mut threads: Vec<(ProposalComment, Vec<ProposalComment>)> = all
            .iter()
            .filter(|c| c.parent.is_none())
            .map(|c| (c.clone(), Vec::new()))
            .collect();
        for reply in all.iter().filter(|c| c.parent.is_some()) {
            if let Some((_, replies)) = threads
                .iter_mut()
                .find(|(top, _)| Some(top.id) == reply.parent)
            {
                replies.push(reply.clone());
            }
        }
        Ok(threads)
    }
}
