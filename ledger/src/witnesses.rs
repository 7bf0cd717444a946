//! Automatic witness selection for new trust blocks.
//!
//! Witnesses are experienced, recently active users, preferably from the
//! actor's own neighborhood. An actor without a neighborhood gets the same
//! ranking over the whole platform.

use poh_store::{ProfileStore, StoreError};
use poh_types::time::SECS_PER_DAY;
use poh_types::{Timestamp, UserId};

/// How recently a witness must have been active.
const ACTIVITY_WINDOW_SECS: u64 = 7 * SECS_PER_DAY;
/// Minimum help-given count to witness at all.
const MIN_HELP_GIVEN: u64 = 10;

/// Select up to `count` witnesses for a block by `actor`.
///
/// Eligible users are active within 7 days with `help_given >= 10`,
/// excluding the actor. When the actor has a neighborhood the pool is
/// restricted to it. Ranked by help given, descending; user id breaks ties
/// so selection is deterministic.
pub fn select_witnesses(
    profiles: &dyn ProfileStore,
    actor: &UserId,
    neighborhood: Option<&str>,
    count: usize,
    now: Timestamp,
) -> Result<Vec<UserId>, StoreError> {
    let mut pool: Vec<_> = profiles
        .iter_profiles()?
        .into_iter()
        .filter(|p| &p.user != actor)
        .filter(|p| p.active_within(ACTIVITY_WINDOW_SECS, now))
        .filter(|p| p.help_given >= MIN_HELP_GIVEN)
        .filter(|p| match neighborhood {
            Some(hood) => p.neighborhood.as_deref() == Some(hood),
            None => true,
        })
        .collect();

    pool.sort_by(|a, b| {
        b.help_given
            .cmp(&a.help_given)
            .then_with(|| a.user.cmp(&b.user))
    });
    pool.truncate(count);
    Ok(pool.into_iter().map(|p| p.user).collect())
}
