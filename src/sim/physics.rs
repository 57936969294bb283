//! Physics engine adapter
//!
//! Game rules only talk to the world through [`PhysicsWorld`]: create bodies,
//! freeze/unfreeze them, nudge them, read their pose, and step the world to get
//! the collision pairs that *started* during that step.
//!
//! [`RapierWorld`] backs the trait with `rapier2d`. Coordinates are game units
//! with y growing downward, so gravity is positive y.

use std::collections::HashMap;
use std::fmt;

use std::sync::mpsc::{Receiver, Sender, channel as unbounded};
use glam::Vec2;
use rapier2d::prelude::*;
use serde::{Deserialize, Serialize};

/// Handle to a body inside a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Options for a new circle body
#[derive(Debug, Clone, Copy)]
pub struct CircleOptions {
    pub restitution: f32,
    /// Frozen in place (unaffected by gravity and collision response)
    pub is_static: bool,
}

/// Two bodies whose contact began during the last step (lower id first)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: BodyId,
    pub b: BodyId,
}

impl CollisionPair {
    pub fn new(a: BodyId, b: BodyId) -> Self {
        if a <= b { Self { a, b } } else { Self { a: b, b: a } }
    }
}

/// What the game needs from a 2D rigid-body engine
pub trait PhysicsWorld {
    /// Add a static axis-aligned rectangle (walls)
    fn add_static_rect(&mut self, center: Vec2, size: Vec2) -> BodyId;
    /// Add a circle body
    fn add_circle(&mut self, center: Vec2, radius: f32, options: CircleOptions) -> BodyId;
    /// Remove a body; unknown ids are ignored
    fn remove(&mut self, body: BodyId);
    /// Freeze or release a body
    fn set_static(&mut self, body: BodyId, is_static: bool);
    /// Move a body by `delta` without touching its velocity
    fn translate(&mut self, body: BodyId, delta: Vec2);
    fn position(&self, body: BodyId) -> Option<Vec2>;
    fn angle(&self, body: BodyId) -> Option<f32>;
    fn circle_radius(&self, body: BodyId) -> Option<f32>;
    /// Advance the world by `dt` seconds, returning newly started contacts
    fn step(&mut self, dt: f32) -> Vec<CollisionPair>;
}

/// Velocity damping per second (about 1% per 60 Hz step)
const AIR_DAMPING: f32 = 0.6;
const BALL_FRICTION: f32 = 0.1;
/// Tolerances are scaled for pixel-sized units
const LENGTH_UNIT: f32 = 100.0;

/// `rapier2d` world keyed by game [`BodyId`]s
pub struct RapierWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,

    handles: HashMap<BodyId, (RigidBodyHandle, ColliderHandle)>,
    /// Reverse lookup for collision events
    owners: HashMap<ColliderHandle, BodyId>,

    collision_send: Sender<CollisionEvent>,
    collision_recv: Receiver<CollisionEvent>,
    force_send: Sender<ContactForceEvent>,
    force_recv: Receiver<ContactForceEvent>,
    next_id: u32,
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(Vec2::new(0.0, crate::consts::GRAVITY))
    }
}

impl fmt::Debug for RapierWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RapierWorld")
            .field("gravity", &self.gravity)
            .field("bodies", &self.handles.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl RapierWorld {
    pub fn new(gravity: Vec2) -> Self {
        let mut params = IntegrationParameters::default();
        params.length_unit = LENGTH_UNIT;
        let (collision_send, collision_recv) = unbounded();
        let (force_send, force_recv) = unbounded();

        Self {
            gravity: vector![gravity.x, gravity.y],
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            handles: HashMap::new(),
            owners: HashMap::new(),
            collision_send,
            collision_recv,
            force_send,
            force_recv,
            next_id: 1,
        }
    }

    /// Number of bodies (walls included)
    #[cfg(test)]
    pub(crate) fn body_count(&self) -> usize {
        self.handles.len()
    }

    fn insert(&mut self, body: RigidBody, collider: Collider) -> BodyId {
        let rb = self.bodies.insert(body);
        let col = self
            .colliders
            .insert_with_parent(collider, rb, &mut self.bodies);

        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.handles.insert(id, (rb, col));
        self.owners.insert(col, id);
        id
    }

    fn rigid_body(&self, body: BodyId) -> Option<&RigidBody> {
        let (rb, _) = self.handles.get(&body)?;
        self.bodies.get(*rb)
    }

    fn rigid_body_mut(&mut self, body: BodyId) -> Option<&mut RigidBody> {
        let (rb, _) = self.handles.get(&body)?;
        self.bodies.get_mut(*rb)
    }
}

impl PhysicsWorld for RapierWorld {
    fn add_static_rect(&mut self, center: Vec2, size: Vec2) -> BodyId {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let collider = ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0).build();
        self.insert(body, collider)
    }

    fn add_circle(&mut self, center: Vec2, radius: f32, options: CircleOptions) -> BodyId {
        let builder = if options.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let body = builder
            .translation(vector![center.x, center.y])
            .linear_damping(AIR_DAMPING)
            .build();
        let collider = ColliderBuilder::ball(radius)
            .restitution(options.restitution)
            .friction(BALL_FRICTION)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        self.insert(body, collider)
    }

    fn remove(&mut self, body: BodyId) {
        let Some((rb, col)) = self.handles.remove(&body) else {
            return;
        };
        self.owners.remove(&col);
        self.bodies.remove(
            rb,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn set_static(&mut self, body: BodyId, is_static: bool) {
        if let Some(rb) = self.rigid_body_mut(body) {
            let kind = if is_static {
                RigidBodyType::Fixed
            } else {
                RigidBodyType::Dynamic
            };
            rb.set_body_type(kind, true);
            rb.set_linvel(vector![0.0, 0.0], true);
            rb.set_angvel(0.0, true);
        }
    }

    fn translate(&mut self, body: BodyId, delta: Vec2) {
        if let Some(rb) = self.rigid_body_mut(body) {
            let moved = rb.translation() + vector![delta.x, delta.y];
            rb.set_translation(moved, true);
        }
    }

    fn position(&self, body: BodyId) -> Option<Vec2> {
        self.rigid_body(body).map(|rb| {
            let t = rb.translation();
            Vec2::new(t.x, t.y)
        })
    }

    fn angle(&self, body: BodyId) -> Option<f32> {
        self.rigid_body(body).map(|rb| rb.rotation().angle())
    }

    fn circle_radius(&self, body: BodyId) -> Option<f32> {
        let (_, col) = self.handles.get(&body)?;
        self.colliders
            .get(*col)?
            .shape()
            .as_ball()
            .map(|ball| ball.radius)
    }

    fn step(&mut self, dt: f32) -> Vec<CollisionPair> {
        self.params.dt = dt;
        let events = ChannelEventCollector::new(self.collision_send.clone(), self.force_send.clone());

        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            &(),
            &events,
        );

        // Only contact starts matter
        while self.force_recv.try_recv().is_ok() {}

        let mut started = Vec::new();
        while let Ok(event) = self.collision_recv.try_recv() {
            let CollisionEvent::Started(h1, h2, _flags) = event else {
                continue;
            };
            let (Some(&a), Some(&b)) = (self.owners.get(&h1), self.owners.get(&h2)) else {
                continue;
            };
            let pair = CollisionPair::new(a, b);
            if !started.contains(&pair) {
                started.push(pair);
            }
        }
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn ball(world: &mut RapierWorld, pos: Vec2, radius: f32) -> BodyId {
        world.add_circle(
            pos,
            radius,
            CircleOptions {
                restitution: 0.5,
                is_static: false,
            },
        )
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut world = RapierWorld::default();
        let id = ball(&mut world, Vec2::new(0.0, 0.0), 10.0);
        for _ in 0..10 {
            world.step(DT);
        }
        assert!(world.position(id).unwrap().y > 0.0);
    }

    #[test]
    fn test_static_body_does_not_fall() {
        let mut world = RapierWorld::default();
        let id = world.add_circle(
            Vec2::new(5.0, 5.0),
            10.0,
            CircleOptions {
                restitution: 0.5,
                is_static: true,
            },
        );
        world.step(DT);
        assert_eq!(world.position(id), Some(Vec2::new(5.0, 5.0)));

        world.translate(id, Vec2::new(-5.0, 0.0));
        assert_eq!(world.position(id), Some(Vec2::new(0.0, 5.0)));
    }

    #[test]
    fn test_released_body_falls() {
        let mut world = RapierWorld::default();
        let id = world.add_circle(
            Vec2::ZERO,
            10.0,
            CircleOptions {
                restitution: 0.5,
                is_static: true,
            },
        );
        world.set_static(id, false);
        for _ in 0..10 {
            world.step(DT);
        }
        assert!(world.position(id).unwrap().y > 0.0);
    }

    #[test]
    fn test_collision_start_reported_once() {
        let mut world = RapierWorld::new(Vec2::ZERO);
        let a = ball(&mut world, Vec2::new(0.0, 0.0), 10.0);
        let b = ball(&mut world, Vec2::new(15.0, 0.0), 10.0);

        let mut seen = 0;
        for _ in 0..20 {
            seen += world
                .step(DT)
                .iter()
                .filter(|p| **p == CollisionPair::new(a, b))
                .count();
        }
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_ball_rests_on_floor() {
        let mut world = RapierWorld::default();
        let floor = world.add_static_rect(Vec2::new(0.0, 100.0), Vec2::new(400.0, 50.0));
        let id = ball(&mut world, Vec2::new(0.0, 0.0), 10.0);

        let mut floor_hits = Vec::new();
        for _ in 0..600 {
            floor_hits.extend(world.step(DT));
        }
        let y = world.position(id).unwrap().y;
        // Floor top is at 75; ball center should sit about one radius above it
        assert!((y - 65.0).abs() < 2.0, "ball rested at y = {}", y);
        assert!(floor_hits.contains(&CollisionPair::new(floor, id)));
    }

    #[test]
    fn test_remove_forgets_body() {
        let mut world = RapierWorld::default();
        let id = ball(&mut world, Vec2::ZERO, 10.0);
        assert_eq!(world.circle_radius(id), Some(10.0));
        world.remove(id);
        assert_eq!(world.position(id), None);
        assert_eq!(world.body_count(), 0);
        // Unknown ids are ignored
        world.remove(id);
    }

    #[test]
    fn test_removed_bodies_never_reported() {
        let mut world = RapierWorld::new(Vec2::ZERO);
        let a = ball(&mut world, Vec2::new(0.0, 0.0), 10.0);
        let b = ball(&mut world, Vec2::new(15.0, 0.0), 10.0);
        world.remove(a);
        for _ in 0..5 {
            assert!(world.step(DT).iter().all(|p| p.a != a && p.b != a));
        }
        assert!(world.position(b).is_some());
    }
}
