//! Text shown in the corner of the screen.
//!
//! Rebuilt from a [`ProgressionSnapshot`] whenever progression changes; the
//! renderer only reads it.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Resource;

use crate::resources::progression::ProgressionSnapshot;

pub const HUD_MAX_LINES: usize = 8;

#[derive(Resource, Debug, Default, Clone)]
pub struct HudText {
    pub lines: ArrayVec<String, HUD_MAX_LINES>,
}

impl HudText {
    pub fn refresh(&mut self, snapshot: &ProgressionSnapshot) {
        self.lines.clear();
        let entries = snapshot
            .inventory
            .iter()
            .map(|(category, count)| format!("{}: {}", capitalize(category.name()), count))
            .chain(snapshot.skills.iter().map(|(skill, progress)| {
                format!(
                    "{}: level {} ({}/{} xp)",
                    capitalize(skill.name()),
                    progress.level,
                    progress.xp,
                    progress.threshold()
                )
            }));
        for line in entries {
            if self.lines.try_push(line).is_err() {
                break;
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::progression::{ItemCategory, Progression, Skill};

    #[test]
    fn test_refresh_lists_inventory_then_skills() {
        let mut p = Progression::new();
        p.grant_resource(ItemCategory::Wood, 3);
        p.grant_xp(Skill::Mining, 4);

        let mut hud = HudText::default();
        hud.refresh(&p.snapshot());
        assert_eq!(
            hud.lines.as_slice(),
            &[
                "Wood: 3".to_string(),
                "Ore: 0".to_string(),
                "Lumberjack: level 1 (0/10 xp)".to_string(),
                "Mining: level 1 (4/10 xp)".to_string(),
            ]
        );
    }

    #[test]
    fn test_refresh_replaces_previous_lines() {
        let mut hud = HudText::default();
        let p = Progression::new();
        hud.refresh(&p.snapshot());
        hud.refresh(&p.snapshot());
        assert_eq!(hud.lines.len(), 4);
    }
}
