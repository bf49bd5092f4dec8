//! Static achievement catalog.
//!
//! Thresholds increase monotonically within each category. Declaration
//! order is the only ordering the matcher honors.

use super::{Achievement, AchievementCategory, AchievementTier};

pub static CATALOG: &[Achievement] = &[
    // Streak
    Achievement {
        id: "streak_bronze",
        title: "Dedicated Beginner",
        description: "Keep a 3-day streak",
        tier: AchievementTier::Bronze,
        icon: "flame",
        requirement: 3,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_silver",
        title: "Committed",
        description: "Keep a 7-day streak",
        tier: AchievementTier::Silver,
        icon: "flame",
        requirement: 7,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_silver_2",
        title: "On Fire",
        description: "Keep a 14-day streak",
        tier: AchievementTier::Silver,
        icon: "flame",
        requirement: 14,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_gold",
        title: "Unstoppable",
        description: "Keep a 30-day streak",
        tier: AchievementTier::Gold,
        icon: "shield",
        requirement: 30,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_gold_2",
        title: "Flame Veteran",
        description: "Keep a 60-day streak",
        tier: AchievementTier::Gold,
        icon: "shield",
        requirement: 60,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_platinum",
        title: "Legendary",
        description: "Keep a 100-day streak",
        tier: AchievementTier::Platinum,
        icon: "timer",
        requirement: 100,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_platinum_2",
        title: "Master of Time",
        description: "Keep a 200-day streak",
        tier: AchievementTier::Platinum,
        icon: "timer",
        requirement: 200,
        category: AchievementCategory::Streak,
    },
    Achievement {
        id: "streak_diamond",
        title: "Immortal",
        description: "Keep a 365-day streak",
        tier: AchievementTier::Diamond,
        icon: "infinity",
        requirement: 365,
        category: AchievementCategory::Streak,
    },
    // XP (compared against lifetime total experience)
    Achievement {
        id: "xp_bronze",
        title: "Novice",
        description: "Earn 250 XP",
        tier: AchievementTier::Bronze,
        icon: "zap",
        requirement: 250,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_bronze_2",
        title: "Point Collector",
        description: "Earn 750 XP",
        tier: AchievementTier::Bronze,
        icon: "star",
        requirement: 750,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_silver",
        title: "Experienced",
        description: "Earn 1,250 XP",
        tier: AchievementTier::Silver,
        icon: "zap",
        requirement: 1250,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_gold_low",
        title: "Bounty Hunter",
        description: "Earn 2,500 XP",
        tier: AchievementTier::Gold,
        icon: "award",
        requirement: 2500,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_gold",
        title: "Veteran",
        description: "Earn 5,000 XP",
        tier: AchievementTier::Gold,
        icon: "zap",
        requirement: 5000,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_platinum_low",
        title: "Elite of the Elite",
        description: "Earn 10,000 XP",
        tier: AchievementTier::Platinum,
        icon: "award",
        requirement: 10000,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_platinum",
        title: "Elite",
        description: "Earn 15,000 XP",
        tier: AchievementTier::Platinum,
        icon: "zap",
        requirement: 15000,
        category: AchievementCategory::Xp,
    },
    Achievement {
        id: "xp_diamond",
        title: "Transcendent",
        description: "Earn 30,000 XP",
        tier: AchievementTier::Diamond,
        icon: "milestone",
        requirement: 30000,
        category: AchievementCategory::Xp,
    },
    // Level
    Achievement {
        id: "level_bronze",
        title: "Apprentice",
        description: "Reach level 5",
        tier: AchievementTier::Bronze,
        icon: "crown",
        requirement: 5,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_silver",
        title: "Master",
        description: "Reach level 10",
        tier: AchievementTier::Silver,
        icon: "crown",
        requirement: 10,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_silver_2",
        title: "Knight",
        description: "Reach level 20",
        tier: AchievementTier::Silver,
        icon: "shield-alert",
        requirement: 20,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_gold",
        title: "Grandmaster",
        description: "Reach level 25",
        tier: AchievementTier::Gold,
        icon: "crown",
        requirement: 25,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_gold_2",
        title: "Specialist",
        description: "Reach level 40",
        tier: AchievementTier::Gold,
        icon: "award",
        requirement: 40,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_platinum",
        title: "Champion",
        description: "Reach level 50",
        tier: AchievementTier::Platinum,
        icon: "crown",
        requirement: 50,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_platinum_2",
        title: "Demigod",
        description: "Reach level 75",
        tier: AchievementTier::Platinum,
        icon: "gem",
        requirement: 75,
        category: AchievementCategory::Level,
    },
    Achievement {
        id: "level_diamond",
        title: "Divine",
        description: "Reach level 100",
        tier: AchievementTier::Diamond,
        icon: "crown",
        requirement: 100,
        category: AchievementCategory::Level,
    },
    // Goals completed
    Achievement {
        id: "goals_bronze",
        title: "First Step",
        description: "Complete your first goal",
        tier: AchievementTier::Bronze,
        icon: "target",
        requirement: 1,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_bronze_2",
        title: "Gaining Momentum",
        description: "Complete 5 goals",
        tier: AchievementTier::Bronze,
        icon: "rocket",
        requirement: 5,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_silver",
        title: "Persistent",
        description: "Complete 15 goals",
        tier: AchievementTier::Silver,
        icon: "target",
        requirement: 15,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_gold_low",
        title: "Finishing Machine",
        description: "Complete 30 goals",
        tier: AchievementTier::Gold,
        icon: "check-circle",
        requirement: 30,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_gold",
        title: "Determined",
        description: "Complete 75 goals",
        tier: AchievementTier::Gold,
        icon: "medal",
        requirement: 75,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_platinum_low",
        title: "Unshakeable",
        description: "Complete 150 goals",
        tier: AchievementTier::Platinum,
        icon: "award",
        requirement: 150,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_platinum",
        title: "Relentless",
        description: "Complete 250 goals",
        tier: AchievementTier::Platinum,
        icon: "target",
        requirement: 250,
        category: AchievementCategory::GoalsCompleted,
    },
    Achievement {
        id: "goals_diamond",
        title: "Master of Goals",
        description: "Complete 500 goals",
        tier: AchievementTier::Diamond,
        icon: "medal",
        requirement: 500,
        category: AchievementCategory::GoalsCompleted,
    },
];
