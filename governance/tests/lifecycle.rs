//! End-to-end proposal lifecycle: author, discuss, vote, execute, audit.

use std::sync::Arc;

use poh_governance::{GovernanceEngine, GovernanceError};
use poh_ledger::{verify_chain, TrustLedger};
use poh_nullables::{NullAuditLog, NullClock, NullContentStore, NullEventBus, NullNotifier, NullStore};
use poh_store::{ContentSummary, ProfileStore, ProposalAction, RuleStore, UserProfile};
use poh_types::time::SECS_PER_DAY;
use poh_types::{
    ContentId, ContentKind, ContentRef, GovernableRule, ProposalStatus, Timestamp, UserId,
};

struct World {
    store: Arc<NullStore>,
    content: Arc<NullContentStore>,
    notifier: Arc<NullNotifier>,
    audit: Arc<NullAuditLog>,
    engine: GovernanceEngine,
    clock: NullClock,
}

fn world() -> World {
    poh_utils::init_tracing();
    let store = Arc::new(NullStore::new());
    let content = Arc::new(NullContentStore::new());
    let notifier = Arc::new(NullNotifier::new());
    let events = Arc::new(NullEventBus::new());
    let audit = Arc::new(NullAuditLog::new());
    let ledger = Arc::new(TrustLedger::new(
        store.clone(),
        store.clone(),
        store.clone(),
        notifier.clone(),
        events.clone(),
    ));
    let engine = GovernanceEngine::new(
        ledger,
        store.clone(),
        store.clone(),
        content.clone(),
        store.clone(),
        audit.clone(),
        notifier.clone(),
        events.clone(),
    );
    World {
        store,
        content,
        notifier,
        audit,
        engine,
        clock: NullClock::new(100 * SECS_PER_DAY),
    }
}

fn seed_member(store: &NullStore, name: &str, work: u64, budget: u64, now: Timestamp) -> UserId {
    let user = UserId::new(name);
    let mut p = UserProfile::new(user.clone(), Timestamp::new(0));
    p.help_given = 10;
    p.hours_shared = work;
    p.vote_credits = budget;
    p.last_active_at = now;
    store.put_profile(&p).unwrap();
    user
}

#[test]
fn rule_change_proposal_full_lifecycle() {
    let w = world();
    let author = seed_member(&w.store, "author", 25, 0, w.clock.now());
    let voters: Vec<UserId> = (0..3)
        .map(|n| seed_member(&w.store, &format!("voter-{n}"), 0, 100, w.clock.now()))
        .collect();

    // Day 0: author the proposal; it opens in Discussion.
    let proposal = w
        .engine
        .create_proposal(
            &author,
            "Raise the moderation quorum",
            "Five votes is too few for REMOVE decisions in a community this size.",
            ProposalAction::RuleChange {
                rule: GovernableRule::ModerationQuorum,
                new_value: 7,
            },
            w.clock.now(),
        )
        .unwrap();
    assert_eq!(proposal.status, ProposalStatus::Discussion);

    // Day 1: discussion gathers a comment; early votes bounce.
    w.clock.advance(SECS_PER_DAY);
    w.engine
        .create_comment(proposal.id, &voters[0], "long overdue", None, w.clock.now())
        .unwrap();
    assert!(matches!(
        w.engine.vote(proposal.id, &voters[0], 2, w.clock.now()),
        Err(GovernanceError::ProposalNotInVoting(_))
    ));

    // Day 4: discussion deadline passed; voting opens lazily on the first
    // vote attempt.
    w.clock.advance(3 * SECS_PER_DAY);
    w.engine.vote(proposal.id, &voters[0], 3, w.clock.now()).unwrap();
    w.engine.vote(proposal.id, &voters[1], 4, w.clock.now()).unwrap();
    assert_eq!(
        w.engine.advance(proposal.id, w.clock.now()).unwrap(),
        ProposalStatus::Voting
    );

    // Third voter pushes the total to the 10-point floor: approved,
    // executed, implemented.
    w.engine.vote(proposal.id, &voters[2], 3, w.clock.now()).unwrap();
    assert_eq!(
        w.engine.advance(proposal.id, w.clock.now()).unwrap(),
        ProposalStatus::Implemented
    );

    // The rule is live for every subsequent reader.
    assert_eq!(w.store.params().unwrap().moderation_quorum, 7);

    // The audit trail recorded the change with before and after values.
    let entries = w.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].subject, "moderation_quorum");
    assert_eq!(entries[0].before["moderation_quorum"], 5);
    assert_eq!(entries[0].after["moderation_quorum"], 7);

    // The author heard about it.
    assert!(w
        .notifier
        .sent()
        .iter()
        .any(|n| n.kind == "proposal_implemented" && n.recipient == author));

    // The provenance block is part of a chain that still verifies.
    assert_eq!(verify_chain(w.store.as_ref()).unwrap(), 1);
    assert!(w.content.removed().is_empty());
}

#[test]
fn community_update_patches_content_with_audit_before_image() {
    let w = world();
    let author = seed_member(&w.store, "author", 25, 0, w.clock.now());
    let voter = seed_member(&w.store, "voter", 0, 200, w.clock.now());

    let community = ContentId::new("community-7");
    let target = ContentRef::new(ContentKind::Community, community.clone());
    w.content.insert_summary(ContentSummary {
        content: target.clone(),
        author: Some(author.clone()),
        title: Some("Riverside Helpers".into()),
        snapshot: serde_json::json!({ "name": "Riverside Helpers", "open": true }),
    });

    let patch = serde_json::json!({ "open": false });
    let proposal = w
        .engine
        .create_proposal(
            &author,
            "Close membership",
            "Pause new joins until the backlog clears.",
            ProposalAction::CommunityUpdate {
                community,
                patch: patch.clone(),
            },
            w.clock.now(),
        )
        .unwrap();

    w.clock.advance(4 * SECS_PER_DAY);
    w.engine.vote(proposal.id, &voter, 10, w.clock.now()).unwrap();

    assert_eq!(
        w.engine.advance(proposal.id, w.clock.now()).unwrap(),
        ProposalStatus::Implemented
    );
    assert_eq!(w.content.patched(), vec![(target, patch)]);

    let entries = w.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "community_update");
    assert_eq!(entries[0].before["name"], "Riverside Helpers");
    assert_eq!(entries[0].after["open"], false);
}

#[test]
fn dissolution_removes_the_community_and_audits() {
    let w = world();
    let author = seed_member(&w.store, "author", 25, 0, w.clock.now());
    let voter = seed_member(&w.store, "voter", 0, 200, w.clock.now());

    let community = ContentId::new("community-9");
    let target = ContentRef::new(ContentKind::Community, community.clone());
    let proposal = w
        .engine
        .create_proposal(
            &author,
            "Dissolve the inactive book club",
            "No activity in a year; release the members.",
            ProposalAction::CommunityDissolution { community },
            w.clock.now(),
        )
        .unwrap();

    w.clock.advance(4 * SECS_PER_DAY);
    w.engine.vote(proposal.id, &voter, 10, w.clock.now()).unwrap();

    assert_eq!(w.content.removed(), vec![target]);
    let entries = w.audit.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action, "community_dissolution");
    assert_eq!(entries[0].after, serde_json::Value::Null);
}

#[test]
fn voting_window_expires_into_rejection() {
    let w = world();
    let author = seed_member(&w.store, "author", 25, 0, w.clock.now());
    let voter = seed_member(&w.store, "voter", 0, 100, w.clock.now());

    let proposal = w
        .engine
        .create_proposal(
            &author,
            "Community picnic fund",
            "Allocate credits for the spring picnic.",
            ProposalAction::FundAllocation {
                recipient: author.clone(),
                amount: 10,
            },
            w.clock.now(),
        )
        .unwrap();

    // Nobody votes for eight days.
    w.clock.advance(8 * SECS_PER_DAY);
    assert!(matches!(
        w.engine.vote(proposal.id, &voter, 1, w.clock.now()),
        Err(GovernanceError::VotingClosed(_))
    ));
    assert_eq!(
        w.engine.advance(proposal.id, w.clock.now()).unwrap(),
        ProposalStatus::Rejected
    );
}
