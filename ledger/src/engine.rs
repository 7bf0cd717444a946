//! Trust block creation.

use std::sync::Arc;

use crate::error::LedgerError;
use crate::witnesses::select_witnesses;
use poh_reputation::user_work;
use poh_store::{
    BlockStore, Event, EventSink, Notification, NotificationSink, ProfileStore, RuleStore,
    StoreError, TrustBlock,
};
use poh_types::time::SECS_PER_HOUR;
use poh_types::{blake2b_256_multi, BlockHash, BlockKind, BlockStatus, Timestamp, UserId};
use poh_work::{demand_difficulty, BlockMiner, WorkRequirements};

/// Digest of a candidate block's fields, before the nonce search.
///
/// The block hash is `Blake2b(root || nonce_le)`; this root is the canonical
/// serialization of everything else, so any field change invalidates the
/// mined nonce.
pub fn signing_root(
    height: u64,
    previous: &BlockHash,
    kind: BlockKind,
    actor: &UserId,
    content: &serde_json::Value,
    difficulty: u32,
    created_at: Timestamp,
) -> [u8; 32] {
    let content_bytes = content.to_string().into_bytes();
    blake2b_256_multi(&[
        &height.to_le_bytes(),
        previous.as_bytes(),
        kind.name().as_bytes(),
        actor.as_str().as_bytes(),
        &content_bytes,
        &difficulty.to_le_bytes(),
        &created_at.as_secs().to_le_bytes(),
    ])
}

/// The trust ledger engine: builds, mines, and appends trust blocks.
pub struct TrustLedger {
    blocks: Arc<dyn BlockStore>,
    profiles: Arc<dyn ProfileStore>,
    rules: Arc<dyn RuleStore>,
    notifier: Arc<dyn NotificationSink>,
    events: Arc<dyn EventSink>,
    requirements: WorkRequirements,
}

impl TrustLedger {
    pub fn new(
        blocks: Arc<dyn BlockStore>,
        profiles: Arc<dyn ProfileStore>,
        rules: Arc<dyn RuleStore>,
        notifier: Arc<dyn NotificationSink>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            blocks,
            profiles,
            rules,
            notifier,
            events,
            requirements: WorkRequirements::standard(),
        }
    }

    /// Create a trust block for a claimed action.
    ///
    /// The actor's accumulated work must cover the requirement for `kind`.
    /// Difficulty comes from the trailing-hour block rate, queried live. The
    /// nonce search runs before the append, never inside it. The block lands
    /// Pending and validation is requested from `witnesses`, or from an
    /// auto-selected witness set when none are supplied.
    pub fn create_block(
        &self,
        kind: BlockKind,
        actor: &UserId,
        content: serde_json::Value,
        witnesses: Option<Vec<UserId>>,
        now: Timestamp,
    ) -> Result<TrustBlock, LedgerError> {
        let profile = self.profiles.get_profile(actor)?;
        let have = profile.as_ref().map(user_work).unwrap_or(0);
        self.requirements.check(kind, have)?;

        let params = self.rules.params()?;
        let recent = self
            .blocks
            .count_created_since(Timestamp::new(now.as_secs().saturating_sub(SECS_PER_HOUR)))?;
        let difficulty = demand_difficulty(recent);

        let (height, previous) = match self.blocks.head()? {
            Some((height, hash)) => (height + 1, hash),
            None => (1, BlockHash::ZERO),
        };

        let root = signing_root(height, &previous, kind, actor, &content, difficulty, now);
        let miner = BlockMiner::new(params.mining_attempt_cap);
        let (nonce, hash) = miner.mine(&root, difficulty)?;

        let block = TrustBlock {
            height,
            hash,
            previous,
            kind,
            actor: actor.clone(),
            content,
            nonce: nonce.0,
            difficulty,
            created_at: now,
            status: BlockStatus::Pending,
        };

        self.blocks.append_block(&block).map_err(|e| match e {
            StoreError::Duplicate(_) => LedgerError::ChainConflict,
            other => LedgerError::Store(other),
        })?;

        let witnesses = match witnesses.filter(|w| !w.is_empty()) {
            Some(list) => list,
            None => select_witnesses(
                self.profiles.as_ref(),
                actor,
                profile.as_ref().and_then(|p| p.neighborhood.as_deref()),
                params.witness_count as usize,
                now,
            )?,
        };
        for witness in &witnesses {
            self.notifier.notify(Notification {
                recipient: witness.clone(),
                kind: "validation_requested".into(),
                title: "Validation requested".into(),
                body: format!("A {} block by {actor} needs your validation", block.kind.name()),
                data: serde_json::json!({
                    "block": block.hash.to_string(),
                    "kind": block.kind.name(),
                }),
            });
        }

        self.events.emit(Event::BlockCreated {
            hash: block.hash,
            kind: block.kind,
            actor: actor.clone(),
        });
        tracing::info!(
            hash = %block.hash,
            height = block.height,
            kind = ?block.kind,
            difficulty,
            witnesses = witnesses.len(),
            "trust block created"
        );

        Ok(block)
    }
}
