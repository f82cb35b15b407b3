//! Resource node lifecycle: creation, gathering, depletion and respawn.
//!
//! [`ResourceManager`] owns every live [`ResourceNode`] and the
//! [`RespawnQueue`] of depleted ones. Per node the lifecycle is:
//!
//! ```text
//! Alive(health = n) --interaction--> Alive(health = n - 1)      (n > 1)
//! Alive(health = 1) --interaction--> Depleted --respawn_delay--> Alive(health = max)
//! ```
//!
//! `Depleted` is never stored: the node is removed in the same call that
//! drains its health and the call reports [`InteractionOutcome::Depleted`].
//!
//! The manager never draws anything. Whoever shows nodes on screen implements
//! [`NodeView`] and is told when a node appears and disappears.
//!
//! Handles are contracts: operating on an id that is not live panics.

use bevy_ecs::prelude::Resource;
use log::{debug, info};
use raylib::prelude::Vector3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::resources::gameconfig::SpawnArea;
use crate::resources::progression::{Progression, Skill};
use crate::resources::resourcekinds::{KindId, ResourceKind, ResourceKinds};
use crate::resources::respawnqueue::RespawnQueue;

/// Stable handle of a live resource node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A gatherable object in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    pub id: NodeId,
    pub kind: KindId,
    /// Remaining hits, `0 <= health <= kind.max_health`.
    pub health: u32,
    pub position: Vector3,
    /// Set on the node returned by the depleting interaction.
    pub collected: bool,
}

/// Result of [`ResourceManager::apply_interaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// Skill level too low; nothing changed.
    NotEligible {
        skill: Skill,
        required: u32,
        current: u32,
    },
    /// Gathered and the node survived with `remaining` health.
    Damaged { remaining: u32 },
    /// Gathered and the node was removed; a respawn is scheduled.
    Depleted,
}

/// Presentation collaborator for resource nodes.
pub trait NodeView {
    /// A node became live; show it.
    fn attach(&mut self, node: &ResourceNode, kind: &ResourceKind);
    /// A node left the live set; release whatever represents it.
    fn release(&mut self, id: NodeId);
}

/// View that shows nothing, for headless simulation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoView;

impl NodeView for NoView {
    fn attach(&mut self, _node: &ResourceNode, _kind: &ResourceKind) {}
    fn release(&mut self, _id: NodeId) {}
}

/// Owner of all live resource nodes and their pending respawns.
#[derive(Resource)]
pub struct ResourceManager {
    kinds: ResourceKinds,
    spawn_area: SpawnArea,
    nodes: FxHashMap<NodeId, ResourceNode>,
    respawns: RespawnQueue,
    next_id: u64,
    rng: fastrand::Rng,
}

impl ResourceManager {
    pub fn new(kinds: ResourceKinds, spawn_area: SpawnArea) -> Self {
        Self {
            kinds,
            spawn_area,
            nodes: FxHashMap::default(),
            respawns: RespawnQueue::new(),
            next_id: 0,
            rng: fastrand::Rng::new(),
        }
    }

    /// Use a fixed seed for node placement.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn kinds(&self) -> &ResourceKinds {
        &self.kinds
    }

    pub fn spawn_area(&self) -> SpawnArea {
        self.spawn_area
    }

    /// Uniform random ground position inside the spawn area.
    pub fn random_position(&mut self) -> Vector3 {
        let area = self.spawn_area;
        Vector3::new(
            area.min_x + self.rng.f32() * (area.max_x - area.min_x),
            0.0,
            area.min_z + self.rng.f32() * (area.max_z - area.min_z),
        )
    }

    /// Create a full-health node of `kind` at `position`.
    pub fn create_node(
        &mut self,
        kind: KindId,
        position: Vector3,
        view: &mut impl NodeView,
    ) -> NodeId {
        let kind_def = self.kinds.get(kind);
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let node = ResourceNode {
            id,
            kind,
            health: kind_def.max_health,
            position,
            collected: false,
        };
        view.attach(&node, kind_def);
        self.nodes.insert(id, node);
        id
    }

    /// Scatter nodes over the spawn area.
    ///
    /// Each kind receives `round(count * spawn_share)` nodes. Returns the
    /// number of nodes created.
    pub fn populate(&mut self, count: u32, view: &mut impl NodeView) -> usize {
        let plan: Vec<(KindId, usize)> = self
            .kinds
            .iter()
            .map(|(id, kind)| (id, (count as f32 * kind.spawn_share).round() as usize))
            .collect();

        let mut created = 0;
        for (kind, n) in plan {
            for _ in 0..n {
                let position = self.random_position();
                self.create_node(kind, position, view);
            }
            created += n;
            debug!("Populated {} x {}", n, self.kinds.get(kind).key);
        }
        info!("Populated {} resource nodes", created);
        created
    }

    /// Gather from node `id` at simulation time `now`.
    ///
    /// Panics if `id` is not live.
    pub fn apply_interaction(
        &mut self,
        id: NodeId,
        progression: &mut Progression,
        now: f32,
        view: &mut impl NodeView,
    ) -> InteractionOutcome {
        let node = self
            .nodes
            .get_mut(&id)
            .unwrap_or_else(|| panic!("interaction with unknown resource node {:?}", id));
        let kind = self.kinds.get(node.kind);

        let current = progression.level(kind.skill);
        if current < kind.required_level {
            return InteractionOutcome::NotEligible {
                skill: kind.skill,
                required: kind.required_level,
                current,
            };
        }

        node.health = node.health.saturating_sub(1);
        progression.grant_resource(kind.category, kind.yield_amount);
        if progression.grant_xp(kind.skill, kind.xp_reward) {
            info!(
                "{} level up! Now level {}",
                kind.skill,
                progression.level(kind.skill)
            );
        }

        if node.health > 0 {
            return InteractionOutcome::Damaged {
                remaining: node.health,
            };
        }

        let fire_at = now + kind.respawn_delay;
        let kind_id = node.kind;
        let position = node.position;
        let removed = self.remove_node(id, view);
        debug_assert!(removed.collected);
        self.respawns.schedule(kind_id, position, fire_at);
        InteractionOutcome::Depleted
    }

    /// Bring back every node whose respawn is due at `now`.
    ///
    /// Returns the ids of the new nodes in firing order.
    pub fn respawn_due(&mut self, now: f32, view: &mut impl NodeView) -> SmallVec<[NodeId; 4]> {
        let mut spawned = SmallVec::new();
        while let Some(ticket) = self.respawns.pop_due(now) {
            let id = self.create_node(ticket.kind, ticket.position, view);
            debug!(
                "Respawned {} as {:?} at t={:.2}",
                self.kinds.get(ticket.kind).key,
                id,
                now
            );
            spawned.push(id);
        }
        spawned
    }

    /// Detach node `id` from the live set and release its presentation.
    ///
    /// Panics if `id` is not live. No respawn is scheduled.
    pub fn remove_node(&mut self, id: NodeId, view: &mut impl NodeView) -> ResourceNode {
        let mut node = self
            .nodes
            .remove(&id)
            .unwrap_or_else(|| panic!("removal of unknown resource node {:?}", id));
        node.collected = node.health == 0;
        view.release(id);
        node
    }

    /// Cancel every pending respawn. Returns how many were cancelled.
    pub fn cancel_pending_respawns(&mut self) -> usize {
        self.respawns.clear()
    }

    /// Cancel pending respawns and remove every live node.
    pub fn shutdown(&mut self, view: &mut impl NodeView) {
        let cancelled = self.cancel_pending_respawns();
        let ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        for id in &ids {
            self.remove_node(*id, view);
        }
        info!(
            "Resource manager shut down: {} nodes removed, {} respawns cancelled",
            ids.len(),
            cancelled
        );
    }

    pub fn get(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.values()
    }

    pub fn count_of_kind(&self, kind: KindId) -> usize {
        self.nodes.values().filter(|n| n.kind == kind).count()
    }

    /// World time at which the earliest pending respawn fires.
    pub fn next_respawn_at(&self) -> Option<f32> {
        self.respawns.next_fire_at()
    }

    pub fn pending_respawn_count(&self) -> usize {
        self.respawns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::progression::ItemCategory;

    #[derive(Default)]
    struct RecordingView {
        attached: Vec<NodeId>,
        released: Vec<NodeId>,
    }

    impl NodeView for RecordingView {
        fn attach(&mut self, node: &ResourceNode, _kind: &ResourceKind) {
            self.attached.push(node.id);
        }
        fn release(&mut self, id: NodeId) {
            self.released.push(id);
        }
    }

    fn manager() -> ResourceManager {
        ResourceManager::new(ResourceKinds::default(), SpawnArea::default()).with_seed(7)
    }

    #[test]
    fn test_create_node_starts_at_full_health() {
        let mut m = manager();
        let mut view = RecordingView::default();
        let rock = m.kinds().expect_id("rock");
        let id = m.create_node(rock, Vector3::new(1.0, 0.0, 2.0), &mut view);

        let node = m.get(id).unwrap();
        assert_eq!(node.health, 5);
        assert_eq!(node.kind, rock);
        assert!(!node.collected);
        assert_eq!(view.attached, vec![id]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut m = manager();
        let rock = m.kinds().expect_id("rock");
        let a = m.create_node(rock, Vector3::new(0.0, 0.0, 0.0), &mut NoView);
        let b = m.create_node(rock, Vector3::new(0.0, 0.0, 0.0), &mut NoView);
        assert_ne!(a, b);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_rock_scenario_depletes_on_fifth_hit() {
        let mut m = manager();
        let mut p = Progression::new();
        let mut view = RecordingView::default();
        let rock = m.kinds().expect_id("rock");
        let id = m.create_node(rock, Vector3::new(4.0, 0.0, 4.0), &mut view);

        let outcomes: Vec<_> = (0..5)
            .map(|_| m.apply_interaction(id, &mut p, 0.0, &mut view))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                InteractionOutcome::Damaged { remaining: 4 },
                InteractionOutcome::Damaged { remaining: 3 },
                InteractionOutcome::Damaged { remaining: 2 },
                InteractionOutcome::Damaged { remaining: 1 },
                InteractionOutcome::Depleted,
            ]
        );
        assert_eq!(p.item_count(ItemCategory::Ore), 5);
        assert_eq!(p.level(Skill::Mining), 3);
        assert_eq!(p.skill(Skill::Mining).xp, 20);
        assert!(!m.contains(id));
        assert_eq!(view.released, vec![id]);
        assert_eq!(m.pending_respawn_count(), 1);
    }

    #[test]
    fn test_ineligible_interaction_changes_nothing() {
        let mut m = manager();
        let mut p = Progression::new();
        let advanced = m.kinds().expect_id("advanced_tree");
        let id = m.create_node(advanced, Vector3::new(0.0, 0.0, 0.0), &mut NoView);

        let outcome = m.apply_interaction(id, &mut p, 0.0, &mut NoView);
        assert_eq!(
            outcome,
            InteractionOutcome::NotEligible {
                skill: Skill::Lumberjack,
                required: 5,
                current: 1
            }
        );
        assert_eq!(m.get(id).unwrap().health, 8);
        assert_eq!(p.item_count(ItemCategory::Wood), 0);
        assert_eq!(p.skill(Skill::Lumberjack).xp, 0);
    }

    #[test]
    fn test_respawn_waits_for_delay_and_reuses_position() {
        let mut m = manager();
        let mut p = Progression::new();
        let basic = m.kinds().expect_id("basic_tree");
        let position = Vector3::new(-12.0, 0.0, 33.0);
        let id = m.create_node(basic, position, &mut NoView);

        for _ in 0..5 {
            m.apply_interaction(id, &mut p, 10.0, &mut NoView);
        }
        assert!(m.is_empty());

        // basic_tree respawns 30 seconds after depletion at t=10
        assert!(m.respawn_due(39.9, &mut NoView).is_empty());
        let spawned = m.respawn_due(40.0, &mut NoView);
        assert_eq!(spawned.len(), 1);

        let node = m.get(spawned[0]).unwrap();
        assert_ne!(node.id, id);
        assert_eq!(node.kind, basic);
        assert_eq!(node.health, 5);
        assert_eq!(node.position, position);
        assert_eq!(m.pending_respawn_count(), 0);
    }

    #[test]
    fn test_populate_follows_spawn_shares_within_bounds() {
        let mut m = manager();
        let created = m.populate(150, &mut NoView);
        assert_eq!(created, 120 + 30 + 150);
        assert_eq!(m.len(), 300);

        let kinds = m.kinds().clone();
        assert_eq!(m.count_of_kind(kinds.expect_id("basic_tree")), 120);
        assert_eq!(m.count_of_kind(kinds.expect_id("advanced_tree")), 30);
        assert_eq!(m.count_of_kind(kinds.expect_id("rock")), 150);

        let area = m.spawn_area();
        for node in m.iter() {
            assert!(area.contains(node.position.x, node.position.z));
            assert_eq!(node.position.y, 0.0);
        }
    }

    #[test]
    fn test_shutdown_cancels_respawns_and_clears_nodes() {
        let mut m = manager();
        let mut p = Progression::new();
        let mut view = RecordingView::default();
        let rock = m.kinds().expect_id("rock");
        let doomed = m.create_node(rock, Vector3::new(0.0, 0.0, 0.0), &mut view);
        m.create_node(rock, Vector3::new(1.0, 0.0, 0.0), &mut view);
        for _ in 0..5 {
            m.apply_interaction(doomed, &mut p, 0.0, &mut view);
        }

        m.shutdown(&mut view);
        assert!(m.is_empty());
        assert_eq!(m.pending_respawn_count(), 0);
        assert_eq!(view.released.len(), 2);
        assert!(m.respawn_due(1000.0, &mut view).is_empty());
    }

    #[test]
    fn test_remove_node_does_not_schedule_respawn() {
        let mut m = manager();
        let rock = m.kinds().expect_id("rock");
        let id = m.create_node(rock, Vector3::new(0.0, 0.0, 0.0), &mut NoView);
        let node = m.remove_node(id, &mut NoView);
        assert_eq!(node.id, id);
        assert!(!node.collected);
        assert_eq!(m.pending_respawn_count(), 0);
    }

    #[test]
    #[should_panic(expected = "interaction with unknown resource node")]
    fn test_interaction_with_removed_node_panics() {
        let mut m = manager();
        let mut p = Progression::new();
        let rock = m.kinds().expect_id("rock");
        let id = m.create_node(rock, Vector3::new(0.0, 0.0, 0.0), &mut NoView);
        m.remove_node(id, &mut NoView);
        m.apply_interaction(id, &mut p, 0.0, &mut NoView);
    }
}
