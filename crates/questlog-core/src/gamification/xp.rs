//! XP and level arithmetic.
//!
//! Levels are funded by a per-level threshold of `floor(100 * level^1.5)`
//! XP. `experience` holds progress inside the current level and resets on
//! every crossing; `total_experience` is the lifetime sum and only ever
//! moves by the amounts actually granted or revoked.

use serde::{Deserialize, Serialize};

/// XP granted per weekly completion, keyed by the goal's desired weekly
/// frequency. Frozen onto the goal record at create/update time so past
/// completions keep the reward that was active when XP was granted.
pub fn xp_reward_for_frequency(desired_weekly_frequency: u8) -> u32 {
    match desired_weekly_frequency {
        1 => 10,
        2 => 15,
        3 => 20,
        4 => 30,
        5 => 35,
        6 => 40,
        7 => 50,
        _ => 10,
    }
}

/// XP required to advance past `level`: `floor(100 * level^1.5)`.
///
/// Level 1 -> 100, level 2 -> 282, level 3 -> 519, level 9 -> 2700.
/// The floor keeps transitions deterministic across platforms.
pub fn xp_for_next_level(level: u32) -> u64 {
    (100.0 * f64::from(level).powf(1.5)).floor() as u64
}

/// Snapshot of a user's XP/level fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpState {
    /// Progress inside the current level. Always `< experience_to_next_level`.
    pub experience: u64,
    /// Lifetime XP sum, floored at zero on removal.
    pub total_experience: u64,
    /// Current level, never below 1.
    pub level: u32,
    /// Threshold for the current level.
    pub experience_to_next_level: u64,
}

/// Apply an XP gain, crossing as many level boundaries as the amount funds.
///
/// The loop (rather than a single comparison) is what makes one large
/// grant jump several levels at once.
pub fn add_xp(state: XpState, amount: u64) -> XpState {
    let mut experience = state.experience + amount;
    let total_experience = state.total_experience + amount;
    let mut level = state.level;
    let mut experience_to_next_level = state.experience_to_next_level;

    while experience >= experience_to_next_level {
        experience -= experience_to_next_level;
        level += 1;
        experience_to_next_level = xp_for_next_level(level);
    }

    XpState {
        experience,
        total_experience,
        level,
        experience_to_next_level,
    }
}

/// Apply an XP loss, descending level boundaries as needed.
///
/// Not a perfect inverse of [`add_xp`]: total experience floors at zero,
/// level floors at 1, and in-level experience floors at zero once the
/// level has bottomed out. Removing more XP than was ever gained therefore
/// stops at the floor instead of going negative.
pub fn remove_xp(state: XpState, amount: u64) -> XpState {
    let mut experience = state.experience as i64 - amount as i64;
    let total_experience = state.total_experience.saturating_sub(amount);
    let mut level = state.level;
    let mut experience_to_next_level = state.experience_to_next_level;

    while experience < 0 && level > 1 {
        level -= 1;
        let previous_threshold = xp_for_next_level(level);
        experience += previous_threshold as i64;
        experience_to_next_level = previous_threshold;
    }

    if experience < 0 {
        experience = 0;
    }

    XpState {
        experience: experience as u64,
        total_experience,
        level,
        experience_to_next_level,
    }
}
