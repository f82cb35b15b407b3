//! Player progression: inventory counters and skill levels.
//!
//! A single [`Progression`] resource is inserted into the world at startup and
//! handed by reference to the
//! [`ResourceManager`](crate::resources::resourcemanager::ResourceManager)
//! when an interaction succeeds. The HUD reads it through
//! [`Progression::snapshot`].
//!
//! # Leveling curve
//!
//! Reaching `level * XP_PER_LEVEL` XP raises the level by one and resets XP to
//! zero. Surplus XP is discarded and a single grant resolves at most one
//! level-up.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;

/// XP needed per level: advancing from level `n` takes `n * XP_PER_LEVEL`.
pub const XP_PER_LEVEL: u32 = 10;

/// Inventory buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Wood,
    Ore,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 2] = [ItemCategory::Wood, ItemCategory::Ore];

    /// Case-insensitive lookup by configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Wood => "wood",
            ItemCategory::Ore => "ore",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progression tracks that gate which kinds can be gathered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Lumberjack,
    Mining,
}

impl Skill {
    pub const ALL: [Skill; 2] = [Skill::Lumberjack, Skill::Mining];

    /// Case-insensitive lookup by configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Lumberjack => "lumberjack",
            Skill::Mining => "mining",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Level and XP accumulated in one skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkillProgress {
    pub level: u32,
    pub xp: u32,
}

impl Default for SkillProgress {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl SkillProgress {
    /// XP required to leave the current level.
    pub fn threshold(&self) -> u32 {
        self.level * XP_PER_LEVEL
    }
}

/// Read-only copy of the progression state for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressionSnapshot {
    pub inventory: Vec<(ItemCategory, u32)>,
    pub skills: Vec<(Skill, SkillProgress)>,
}

/// Inventory and skill state of the player.
#[derive(Resource, Debug, Clone)]
pub struct Progression {
    inventory: FxHashMap<ItemCategory, u32>,
    skills: FxHashMap<Skill, SkillProgress>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

impl Progression {
    /// Empty inventory, every skill at level 1 with 0 XP.
    pub fn new() -> Self {
        Self {
            inventory: ItemCategory::ALL.into_iter().map(|c| (c, 0)).collect(),
            skills: Skill::ALL
                .into_iter()
                .map(|s| (s, SkillProgress::default()))
                .collect(),
        }
    }

    /// Add `amount` items to the `category` bucket.
    pub fn grant_resource(&mut self, category: ItemCategory, amount: u32) {
        let count = self.inventory.entry(category).or_insert(0);
        *count = count.saturating_add(amount);
    }

    /// Add XP to `skill`, resolving at most one level-up.
    ///
    /// Returns `true` when the grant raised the level.
    pub fn grant_xp(&mut self, skill: Skill, amount: u32) -> bool {
        let progress = self.skills.entry(skill).or_default();
        progress.xp = progress.xp.saturating_add(amount);
        if progress.xp >= progress.threshold() {
            progress.level += 1;
            progress.xp = 0;
            true
        } else {
            false
        }
    }

    pub fn item_count(&self, category: ItemCategory) -> u32 {
        self.inventory.get(&category).copied().unwrap_or(0)
    }

    pub fn skill(&self, skill: Skill) -> SkillProgress {
        self.skills.get(&skill).copied().unwrap_or_default()
    }

    pub fn level(&self, skill: Skill) -> u32 {
        self.skill(skill).level
    }

    /// Stable-ordered copy of inventory and skills.
    pub fn snapshot(&self) -> ProgressionSnapshot {
        let mut inventory: Vec<_> = self.inventory.iter().map(|(c, n)| (*c, *n)).collect();
        inventory.sort_by_key(|(c, _)| *c);
        let mut skills: Vec<_> = self.skills.iter().map(|(s, p)| (*s, *p)).collect();
        skills.sort_by_key(|(s, _)| *s);
        ProgressionSnapshot { inventory, skills }
    }
}
