//! Static table of gatherable resource kinds.
//!
//! A [`ResourceKind`] is the template every [`ResourceNode`] is stamped from:
//! health, respawn delay, the skill that gathers it and the level it requires,
//! what it yields and how much XP it grants. The table is built once at
//! startup (defaults or `[resource.<key>]` INI sections) and never changes.
//!
//! ```ini
//! [resource.rock]
//! name = Rock
//! health = 5
//! respawn_time = 45
//! required_level = 1
//! skill = mining
//! category = ore
//! yield = 1
//! xp = 10
//! model = assets/rock1.glb
//! spawn_share = 1.0
//! footprint = 1.5
//! height = 1.0
//! ```
//!
//! [`ResourceNode`]: crate::resources::resourcemanager::ResourceNode

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::path::Path;

use crate::resources::gameconfig::{ConfigError, ini_float, ini_uint};
use crate::resources::progression::{ItemCategory, Skill};

const KIND_SECTION_PREFIX: &str = "resource.";

/// Index of a kind inside its [`ResourceKinds`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct KindId(pub u16);

/// Template for a family of resource nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceKind {
    /// Configuration key, e.g. `basic_tree`.
    pub key: String,
    /// Display name used in log messages.
    pub name: String,
    pub max_health: u32,
    /// Seconds between depletion and reappearance.
    pub respawn_delay: f32,
    pub required_level: u32,
    pub skill: Skill,
    pub category: ItemCategory,
    /// Items granted per successful interaction.
    pub yield_amount: u32,
    /// XP granted per successful interaction.
    pub xp_reward: u32,
    /// Model asset path; opaque to the simulation.
    pub model: String,
    /// Fraction of the populate count spawned for this kind.
    pub spawn_share: f32,
    /// Width and depth of the node's hitbox.
    pub footprint: f32,
    /// Height of the node's hitbox.
    pub height: f32,
}

impl ResourceKind {
    fn validate(&self) -> Result<(), ConfigError> {
        let fail = |message: &str| ConfigError::InvalidKind {
            key: self.key.clone(),
            message: message.to_string(),
        };
        if self.max_health == 0 {
            return Err(fail("health must be at least 1"));
        }
        if !self.respawn_delay.is_finite() || self.respawn_delay < 0.0 {
            return Err(fail("respawn_time must be a finite, non-negative number"));
        }
        if !self.spawn_share.is_finite() || self.spawn_share < 0.0 {
            return Err(fail("spawn_share must be a finite, non-negative number"));
        }
        if !(self.footprint.is_finite() && self.height.is_finite())
            || self.footprint <= 0.0
            || self.height <= 0.0
        {
            return Err(fail("footprint and height must be finite and positive"));
        }
        Ok(())
    }
}

/// The immutable kind table.
#[derive(Resource, Debug, Clone, Serialize)]
pub struct ResourceKinds {
    kinds: Vec<ResourceKind>,
    #[serde(skip)]
    by_key: FxHashMap<String, KindId>,
}

impl Default for ResourceKinds {
    fn default() -> Self {
        Self::new(vec![
            ResourceKind {
                key: "basic_tree".to_string(),
                name: "Basic Tree".to_string(),
                max_health: 5,
                respawn_delay: 30.0,
                required_level: 1,
                skill: Skill::Lumberjack,
                category: ItemCategory::Wood,
                yield_amount: 1,
                xp_reward: 15,
                model: "assets/tree1.glb".to_string(),
                spawn_share: 0.8,
                footprint: 1.0,
                height: 4.0,
            },
            ResourceKind {
                key: "advanced_tree".to_string(),
                name: "Advanced Tree".to_string(),
                max_health: 8,
                respawn_delay: 45.0,
                required_level: 5,
                skill: Skill::Lumberjack,
                category: ItemCategory::Wood,
                yield_amount: 3,
                xp_reward: 150,
                model: "assets/tree2.glb".to_string(),
                spawn_share: 0.2,
                footprint: 1.4,
                height: 6.0,
            },
            ResourceKind {
                key: "rock".to_string(),
                name: "Rock".to_string(),
                max_health: 5,
                respawn_delay: 45.0,
                required_level: 1,
                skill: Skill::Mining,
                category: ItemCategory::Ore,
                yield_amount: 1,
                xp_reward: 10,
                model: "assets/rock1.glb".to_string(),
                spawn_share: 1.0,
                footprint: 1.5,
                height: 1.0,
            },
        ])
        .expect("built-in resource kinds are valid")
    }
}

impl ResourceKinds {
    /// Build a table from a list of kinds. Keys must be unique.
    pub fn new(kinds: Vec<ResourceKind>) -> Result<Self, ConfigError> {
        if kinds.len() > u16::MAX as usize {
            return Err(ConfigError::InvalidKind {
                key: String::new(),
                message: format!("too many kinds ({})", kinds.len()),
            });
        }
        let mut by_key = FxHashMap::default();
        for (index, kind) in kinds.iter().enumerate() {
            kind.validate()?;
            if by_key.insert(kind.key.clone(), KindId(index as u16)).is_some() {
                return Err(ConfigError::InvalidKind {
                    key: kind.key.clone(),
                    message: "duplicate key".to_string(),
                });
            }
        }
        Ok(Self { kinds, by_key })
    }

    /// Build the table from `[resource.<key>]` sections.
    ///
    /// Falls back to the built-in table when the document has no such
    /// section. Kinds are ordered by key.
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut keys: Vec<String> = ini
            .sections()
            .into_iter()
            .filter_map(|s| s.strip_prefix(KIND_SECTION_PREFIX).map(str::to_string))
            .collect();
        if keys.is_empty() {
            return Ok(Self::default());
        }
        keys.sort();

        let kinds = keys
            .iter()
            .map(|key| kind_from_section(ini, key))
            .collect::<Result<Vec<_>, _>>()?;
        let table = Self::new(kinds)?;
        info!("Loaded {} resource kinds from config", table.len());
        Ok(table)
    }

    /// Kind for `id`. Panics if the id does not belong to this table.
    pub fn get(&self, id: KindId) -> &ResourceKind {
        self.kinds
            .get(id.0 as usize)
            .unwrap_or_else(|| panic!("unknown resource kind id {:?}", id))
    }

    pub fn id_of(&self, key: &str) -> Option<KindId> {
        self.by_key.get(key).copied()
    }

    /// Like [`id_of`](Self::id_of) but treats an unknown key as a programming error.
    pub fn expect_id(&self, key: &str) -> KindId {
        self.id_of(key)
            .unwrap_or_else(|| panic!("unknown resource kind '{}'", key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (KindId, &ResourceKind)> {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, kind)| (KindId(i as u16), kind))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Write the table as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.kinds)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn kind_from_section(ini: &Ini, key: &str) -> Result<ResourceKind, ConfigError> {
    let section = format!("{}{}", KIND_SECTION_PREFIX, key);
    let section = section.as_str();
    let missing = |field: &str| ConfigError::InvalidKind {
        key: key.to_string(),
        message: format!("missing '{}'", field),
    };

    let skill_name = ini.get(section, "skill").ok_or_else(|| missing("skill"))?;
    let skill = Skill::from_name(&skill_name).ok_or(ConfigError::UnknownSkill(skill_name))?;
    let category_name = ini
        .get(section, "category")
        .ok_or_else(|| missing("category"))?;
    let category = ItemCategory::from_name(&category_name)
        .ok_or(ConfigError::UnknownCategory(category_name))?;

    Ok(ResourceKind {
        key: key.to_string(),
        name: ini.get(section, "name").unwrap_or_else(|| key.to_string()),
        max_health: ini_uint(ini, section, "health")?.ok_or_else(|| missing("health"))?,
        respawn_delay: ini_float(ini, section, "respawn_time")?
            .ok_or_else(|| missing("respawn_time"))?,
        required_level: ini_uint(ini, section, "required_level")?.unwrap_or(1),
        skill,
        category,
        yield_amount: ini_uint(ini, section, "yield")?.unwrap_or(1),
        xp_reward: ini_uint(ini, section, "xp")?.unwrap_or(0),
        model: ini.get(section, "model").unwrap_or_default(),
        spawn_share: ini_float(ini, section, "spawn_share")?.unwrap_or(1.0),
        footprint: ini_float(ini, section, "footprint")?.unwrap_or(1.0),
        height: ini_float(ini, section, "height")?.unwrap_or(1.0),
    })
}
