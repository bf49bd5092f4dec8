//! Pure gamification engines: XP/level arithmetic and streak continuity.
//!
//! Both engines are synchronous functions of their inputs with no shared
//! state, so concurrent requests can call them freely and always get the
//! same outputs for the same inputs.

pub mod streak;
pub mod xp;

pub use streak::{calculate_streak, StreakOutcome};
pub use xp::{add_xp, remove_xp, xp_for_next_level, xp_reward_for_frequency, XpState};
