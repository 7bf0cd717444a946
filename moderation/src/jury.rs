//! Jury selection for moderation cases.
//!
//! Two tiers: three senior seats go to the most experienced recently active
//! helpers, ranked; two community seats go to moderately experienced users
//! picked by a deterministic hash score over the case seed, so the picks
//! vary per case without being gameable.

use poh_store::{ProfileStore, StoreError};
use poh_types::time::SECS_PER_DAY;
use poh_types::{blake2b_256_multi, Timestamp, UserId};

const SENIOR_SEATS: usize = 3;
const SENIOR_MIN_HELP: u64 = 20;
const SENIOR_ACTIVITY_SECS: u64 = 7 * SECS_PER_DAY;

const COMMUNITY_SEATS: usize = 2;
const COMMUNITY_MIN_HELP: u64 = 5;
const COMMUNITY_ACTIVITY_SECS: u64 = 30 * SECS_PER_DAY;

/// Select the jury for a case.
///
/// Senior seats: `help_given >= 20`, active within 7 days, top three by
/// help given. Community seats: `help_given >= 5`, active within 30 days,
/// two members not already seated, ordered by `Blake2b(seed || user)`.
pub fn select_jury(
    profiles: &dyn ProfileStore,
    seed: &[u8],
    now: Timestamp,
) -> Result<Vec<UserId>, StoreError> {
    let pool = profiles.iter_profiles()?;

    let mut seniors: Vec<_> = pool
        .iter()
        .filter(|p| p.help_given >= SENIOR_MIN_HELP)
        .filter(|p| p.active_within(SENIOR_ACTIVITY_SECS, now))
        .collect();
    seniors.sort_by(|a, b| {
        b.help_given
            .cmp(&a.help_given)
            .then_with(|| a.user.cmp(&b.user))
    });
    seniors.truncate(SENIOR_SEATS);

    let mut jury: Vec<UserId> = seniors.iter().map(|p| p.user.clone()).collect();

    let mut community: Vec<_> = pool
        .iter()
        .filter(|p| p.help_given >= COMMUNITY_MIN_HELP)
        .filter(|p| p.active_within(COMMUNITY_ACTIVITY_SECS, now))
        .filter(|p| !jury.contains(&p.user))
        .map(|p| {
            let score = blake2b_256_multi(&[seed, p.user.as_str().as_bytes()]);
            (score, p.user.clone())
        })
        .collect();
    community.sort();
    jury.extend(community.into_iter().take(COMMUNITY_SEATS).map(|(_, u)| u));

    Ok(jury)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poh_nullables::NullStore;
    use poh_store::UserProfile;

    fn seed_user(store: &NullStore, n: u8, help_given: u64, idle_days: u64, now: Timestamp) -> UserId {
        let user = UserId::new(format!("user-{n:02}"));
        let mut p = UserProfile::new(user.clone(), Timestamp::new(0));
        p.help_given = help_given;
        p.last_active_at = Timestamp::new(now.as_secs() - idle_days * SECS_PER_DAY);
        store.put_profile(&p).unwrap();
        user
    }

    #[test]
    fn seniors_are_ranked_by_help_given() {
        let store = NullStore::new();
        let now = Timestamp::new(100 * SECS_PER_DAY);
        let a = seed_user(&store, 1, 40, 0, now);
        let b = seed_user(&store, 2, 90, 0, now);
        let c = seed_user(&store, 3, 60, 0, now);
        let _low = seed_user(&store, 4, 19, 0, now);

        let jury = select_jury(&store, b"case-1", now).unwrap();
        assert_eq!(&jury[..3], &[b, c, a]);
    }

    #[test]
    fn community_seats_exclude_seniors_and_fill_two() {
        let store = NullStore::new();
        let now = Timestamp::new(100 * SECS_PER_DAY);
        for n in 1..=3 {
            seed_user(&store, n, 50 + n as u64, 0, now);
        }
        for n in 4..=8 {
            seed_user(&store, n, 6, 20, now);
        }

        let jury = select_jury(&store, b"case-2", now).unwrap();
        assert_eq!(jury.len(), 5);
        let unique: std::collections::HashSet<_> = jury.iter().collect();
        assert_eq!(unique.len(), 5, "no juror serves twice");
    }

    #[test]
    fn selection_is_deterministic_per_seed() {
        let store = NullStore::new();
        let now = Timestamp::new(100 * SECS_PER_DAY);
        for n in 1..=10 {
            seed_user(&store, n, 5 + n as u64 * 3, 1, now);
        }

        let j1 = select_jury(&store, b"case-3", now).unwrap();
        let j2 = select_jury(&store, b"case-3", now).unwrap();
        assert_eq!(j1, j2, "same seed must produce the same jury");
    }

    #[test]
    fn different_seeds_rotate_community_seats() {
        let store = NullStore::new();
        let now = Timestamp::new(100 * SECS_PER_DAY);
        for n in 1..=30 {
            seed_user(&store, n, 6, 10, now);
        }

        let j1 = select_jury(&store, b"case-a", now).unwrap();
        let j2 = select_jury(&store, b"case-b", now).unwrap();
        assert_ne!(j1, j2, "different seeds should generally differ");
    }

    #[test]
    fn stale_users_are_excluded() {
        let store = NullStore::new();
        let now = Timestamp::new(100 * SECS_PER_DAY);
        let _stale_senior = seed_user(&store, 1, 80, 31, now);
        let _stale_community = seed_user(&store, 2, 6, 31, now);
        let active = seed_user(&store, 3, 25, 1, now);

        let jury = select_jury(&store, b"case-4", now).unwrap();
        assert_eq!(jury, vec![active]);
    }

    #[test]
    fn empty_pool_returns_empty_jury() {
        let store = NullStore::new();
        let jury = select_jury(&store, b"case-5", Timestamp::new(1000)).unwrap();
        assert!(jury.is_empty());
    }
}
