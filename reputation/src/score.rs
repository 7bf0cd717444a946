//! The reputation formula and the scores derived from it.

use poh_store::UserProfile;
use poh_types::time::SECS_PER_DAY;
use poh_types::Timestamp;

/// Weight of each completed help action given.
const HELP_GIVEN_WEIGHT: u64 = 5;
/// Weight of each completed help action received.
const HELP_RECEIVED_WEIGHT: u64 = 2;
/// Weight of each badge.
const BADGE_WEIGHT: u64 = 10;
/// Weight of each whole month of account age.
const AGE_MONTH_WEIGHT: u64 = 3;
/// Weight of each successful validation.
const VALIDATION_WEIGHT: u64 = 3;

/// Account age is counted in 30-day months.
const SECS_PER_MONTH: u64 = 30 * SECS_PER_DAY;

/// Compute a user's reputation from a profile snapshot.
///
/// An unknown user scores exactly 0. The base score is a weighted sum of
/// the profile counters plus whole months of account age; a recency band
/// then scales it: x1.2 when last active under 7 days ago, x0.8 when last
/// active over 30 days ago. The result is floored to an integer, which the
/// x12/10 and x8/10 integer forms below produce exactly.
pub fn reputation(profile: Option<&UserProfile>, now: Timestamp) -> u64 {
    let Some(profile) = profile else {
        return 0;
    };

    let age_months = profile.joined_at.elapsed_since(now) / SECS_PER_MONTH;
    let base = HELP_GIVEN_WEIGHT * profile.help_given
        + HELP_RECEIVED_WEIGHT * profile.help_received
        + BADGE_WEIGHT * profile.badge_count
        + profile.connection_count
        + AGE_MONTH_WEIGHT * age_months
        + VALIDATION_WEIGHT * profile.successful_validations;

    let idle_secs = profile.last_active_at.elapsed_since(now);
    if idle_secs < 7 * SECS_PER_DAY {
        base * 12 / 10
    } else if idle_secs > 30 * SECS_PER_DAY {
        base * 8 / 10
    } else {
        base
    }
}

/// Accumulated work: completed help hours plus badges. Gates which block
/// kinds the user may create.
pub fn user_work(profile: &UserProfile) -> u64 {
    profile.hours_shared + profile.badge_count
}

/// Validator level from the help-given count.
pub fn validator_level(profile: &UserProfile) -> u8 {
    match profile.help_given {
        n if n >= 100 => 3,
        n if n >= 50 => 2,
        n if n >= 10 => 1,
        _ => 0,
    }
}

/// The stake frozen into a validation vote.
pub fn validation_stake(profile: &UserProfile) -> u64 {
    2 * profile.help_given + profile.hours_shared
}

/// A juror's vote weight: reputation over ten, capped.
pub fn jury_weight(reputation: u64, cap: u64) -> u64 {
    (reputation / 10).min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poh_types::UserId;

    fn profile(n: u8) -> UserProfile {
        UserProfile::new(UserId::new(format!("user-{n}")), Timestamp::new(0))
    }

    #[test]
    fn unknown_user_scores_zero() {
        assert_eq!(reputation(None, Timestamp::new(1_000_000)), 0);
    }

    #[test]
    fn base_weights_sum() {
        let now = Timestamp::new(100 * SECS_PER_DAY);
        let mut p = profile(1);
        p.help_given = 4;
        p.help_received = 3;
        p.badge_count = 2;
        p.connection_count = 7;
        p.successful_validations = 1;
        // joined at 0: 100 days = 3 whole months; idle since epoch > 30 days.
        // base = 20 + 6 + 20 + 7 + 9 + 3 = 65, decayed to 52.
        assert_eq!(reputation(Some(&p), now), 52);
    }

    #[test]
    fn recent_activity_boosts() {
        let now = Timestamp::new(40 * SECS_PER_DAY);
        let mut p = profile(2);
        p.help_given = 10; // base 50 + age 3 = 53... age: 40 days = 1 month -> +3
        p.last_active_at = Timestamp::new(35 * SECS_PER_DAY); // 5 days idle
        assert_eq!(reputation(Some(&p), now), (50 + 3) * 12 / 10);
    }

    #[test]
    fn stale_activity_decays() {
        let now = Timestamp::new(40 * SECS_PER_DAY);
        let mut p = profile(3);
        p.help_given = 10;
        p.last_active_at = Timestamp::new(5 * SECS_PER_DAY); // 35 days idle
        assert_eq!(reputation(Some(&p), now), (50 + 3) * 8 / 10);
    }

    #[test]
    fn mid_band_is_unscaled() {
        let now = Timestamp::new(40 * SECS_PER_DAY);
        let mut p = profile(4);
        p.help_given = 10;
        p.last_active_at = Timestamp::new(30 * SECS_PER_DAY); // 10 days idle
        assert_eq!(reputation(Some(&p), now), 53);
    }

    #[test]
    fn seven_day_boundary_is_exclusive() {
        let now = Timestamp::new(40 * SECS_PER_DAY);
        let mut p = profile(5);
        p.help_given = 10;
        // exactly 7 days idle: no boost
        p.last_active_at = Timestamp::new(33 * SECS_PER_DAY);
        assert_eq!(reputation(Some(&p), now), 53);
    }

    #[test]
    fn thirty_day_boundary_is_exclusive() {
        let now = Timestamp::new(60 * SECS_PER_DAY);
        let mut p = profile(6);
        p.help_given = 10;
        // exactly 30 days idle: no decay; age 2 months -> +6
        p.last_active_at = Timestamp::new(30 * SECS_PER_DAY);
        assert_eq!(reputation(Some(&p), now), 56);
    }

    #[test]
    fn work_is_hours_plus_badges() {
        let mut p = profile(7);
        p.hours_shared = 15;
        p.badge_count = 4;
        assert_eq!(user_work(&p), 19);
    }

    #[test]
    fn validator_levels_step_at_thresholds() {
        let mut p = profile(8);
        assert_eq!(validator_level(&p), 0);
        p.help_given = 9;
        assert_eq!(validator_level(&p), 0);
        p.help_given = 10;
        assert_eq!(validator_level(&p), 1);
        p.help_given = 50;
        assert_eq!(validator_level(&p), 2);
        p.help_given = 100;
        assert_eq!(validator_level(&p), 3);
    }

    #[test]
    fn stake_formula() {
        let mut p = profile(9);
        p.help_given = 10;
        p.hours_shared = 5;
        assert_eq!(validation_stake(&p), 25);
    }

    #[test]
    fn jury_weight_is_capped() {
        assert_eq!(jury_weight(37, 10), 3);
        assert_eq!(jury_weight(250, 10), 10);
        assert_eq!(jury_weight(0, 10), 0);
    }
}
