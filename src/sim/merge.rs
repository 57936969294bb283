//! Merge resolution
//!
//! Runs once per physics step over the pairs whose contact just started.
//! Equal-valued dropped balls become one ball of value + 1 at their midpoint.

use std::collections::HashSet;

use glam::Vec2;

use super::physics::{CircleOptions, CollisionPair, PhysicsWorld};
use super::state::{Ball, BallPhase, GameEvent, GameState};
use crate::settings::GameConfig;

/// Points for producing a ball of `value`
pub fn merge_points(value: u32) -> u64 {
    let v = value as u64;
    v.saturating_mul(v)
}

/// Resolve one step's batch of started contacts; returns the number of merges.
///
/// A ball consumed by an earlier pair in the batch is skipped by later pairs
/// (batch order wins). The current ball never takes part.
pub fn resolve_merges<W: PhysicsWorld>(
    state: &mut GameState,
    world: &mut W,
    pairs: &[CollisionPair],
    config: &GameConfig,
) -> u32 {
    let mut consumed: HashSet<u32> = HashSet::new();
    let mut merges = 0;

    for pair in pairs {
        if pair.a == pair.b {
            continue;
        }
        // Walls and the current ball are not in the dropped set
        let (Some(a), Some(b)) = (
            state.dropped_by_body(pair.a).cloned(),
            state.dropped_by_body(pair.b).cloned(),
        ) else {
            continue;
        };
        if consumed.contains(&a.id) || consumed.contains(&b.id) {
            continue;
        }
        if a.value != b.value {
            continue;
        }

        let (Some(pa), Some(pb)) = (world.position(a.body), world.position(b.body)) else {
            continue;
        };
        let midpoint = (pa + pb) * 0.5;
        let merged = spawn_merged(state, world, a.value.saturating_add(1), midpoint, config);

        world.remove(a.body);
        world.remove(b.body);
        state.dropped.retain(|ball| ball.id != a.id && ball.id != b.id);
        consumed.insert(a.id);
        consumed.insert(b.id);

        let points = merge_points(merged.value);
        state.add_score(points);
        state.events.push(GameEvent::Merged {
            id: merged.id,
            value: merged.value,
            pos: midpoint,
            points,
        });
        log::debug!(
            "Merged #{} + #{} -> #{} (value {}, +{} points)",
            a.id,
            b.id,
            merged.id,
            merged.value,
            points
        );
        state.dropped.push(merged);
        merges += 1;
    }

    merges
}

/// Create a free-falling ball of `value` at `pos`
fn spawn_merged<W: PhysicsWorld>(
    state: &mut GameState,
    world: &mut W,
    value: u32,
    pos: Vec2,
    config: &GameConfig,
) -> Ball {
    let radius = config.base_radius * value as f32;
    let body = world.add_circle(
        pos,
        radius,
        CircleOptions {
            restitution: config.restitution,
            is_static: false,
        },
    );
    Ball {
        id: state.next_ball_id(),
        value,
        radius,
        body,
        phase: BallPhase::Falling,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::physics::{BodyId, RapierWorld};
    use proptest::prelude::*;

    fn setup() -> (GameState, RapierWorld, GameConfig) {
        let config = GameConfig::default();
        (GameState::new(1, &config), RapierWorld::new(Vec2::ZERO), config)
    }

    fn drop_ball(
        state: &mut GameState,
        world: &mut RapierWorld,
        config: &GameConfig,
        value: u32,
        pos: Vec2,
    ) -> BodyId {
        let ball = spawn_merged(state, world, value, pos, config);
        let body = ball.body;
        state.dropped.push(ball);
        body
    }

    #[test]
    fn test_equal_values_merge_at_midpoint() {
        let (mut state, mut world, config) = setup();
        let a = drop_ball(&mut state, &mut world, &config, 3, Vec2::new(100.0, 100.0));
        let b = drop_ball(&mut state, &mut world, &config, 3, Vec2::new(150.0, 100.0));

        let merges = resolve_merges(&mut state, &mut world, &[CollisionPair::new(a, b)], &config);

        assert_eq!(merges, 1);
        assert_eq!(state.score(), 16);
        assert_eq!(state.dropped().len(), 1);
        let merged = &state.dropped()[0];
        assert_eq!(merged.value, 4);
        assert_eq!(merged.radius, 40.0);
        assert_eq!(merged.phase, BallPhase::Falling);
        assert_eq!(world.position(merged.body), Some(Vec2::new(125.0, 100.0)));
        assert_eq!(world.position(a), None);
        assert_eq!(world.position(b), None);
    }

    #[test]
    fn test_unequal_values_do_not_merge() {
        let (mut state, mut world, config) = setup();
        let a = drop_ball(&mut state, &mut world, &config, 2, Vec2::new(100.0, 100.0));
        let b = drop_ball(&mut state, &mut world, &config, 3, Vec2::new(130.0, 100.0));

        let merges = resolve_merges(&mut state, &mut world, &[CollisionPair::new(a, b)], &config);
        assert_eq!(merges, 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.dropped().len(), 2);
    }

    #[test]
    fn test_walls_are_ignored() {
        let (mut state, mut world, config) = setup();
        let wall = world.add_static_rect(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let a = drop_ball(&mut state, &mut world, &config, 1, Vec2::new(5.0, 5.0));

        let merges = resolve_merges(&mut state, &mut world, &[CollisionPair::new(wall, a)], &config);
        assert_eq!(merges, 0);
        assert_eq!(state.dropped().len(), 1);
    }

    #[test]
    fn test_ball_consumed_once_per_batch() {
        let (mut state, mut world, config) = setup();
        let a = drop_ball(&mut state, &mut world, &config, 2, Vec2::new(100.0, 100.0));
        let b = drop_ball(&mut state, &mut world, &config, 2, Vec2::new(130.0, 100.0));
        let c = drop_ball(&mut state, &mut world, &config, 2, Vec2::new(70.0, 100.0));

        let pairs = [CollisionPair::new(a, b), CollisionPair::new(a, c)];
        let merges = resolve_merges(&mut state, &mut world, &pairs, &config);

        // First pair wins; c survives untouched
        assert_eq!(merges, 1);
        assert_eq!(state.score(), 9);
        let values: Vec<u32> = state.dropped().iter().map(|b| b.value).collect();
        assert_eq!(values, vec![2, 3]);
        assert!(world.position(c).is_some());
    }

    #[test]
    fn test_merged_ball_can_merge_in_later_batch() {
        let (mut state, mut world, config) = setup();
        let a = drop_ball(&mut state, &mut world, &config, 1, Vec2::new(100.0, 100.0));
        let b = drop_ball(&mut state, &mut world, &config, 1, Vec2::new(110.0, 100.0));
        let c = drop_ball(&mut state, &mut world, &config, 2, Vec2::new(200.0, 100.0));

        resolve_merges(&mut state, &mut world, &[CollisionPair::new(a, b)], &config);
        let merged = state.dropped().last().unwrap().body;
        resolve_merges(&mut state, &mut world, &[CollisionPair::new(merged, c)], &config);

        assert_eq!(state.dropped().len(), 1);
        assert_eq!(state.dropped()[0].value, 3);
        assert_eq!(state.score(), 4 + 9);
    }

    #[test]
    fn test_points_for_large_values() {
        assert_eq!(merge_points(4), 16);
        assert_eq!(merge_points(u32::MAX), (u32::MAX as u64) * (u32::MAX as u64));
    }

    proptest! {
        #[test]
        fn prop_batch_consumes_each_ball_at_most_once(
            values in prop::collection::vec(1u32..=4, 2..10),
            picks in prop::collection::vec((0usize..10, 0usize..10), 0..20),
        ) {
            let (mut state, mut world, config) = setup();
            let n = values.len();
            let bodies: Vec<BodyId> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| {
                    drop_ball(&mut state, &mut world, &config, v, Vec2::new(i as f32 * 100.0, 0.0))
                })
                .collect();
            let ids: Vec<u32> = state.dropped().iter().map(|b| b.id).collect();
            let pairs: Vec<CollisionPair> = picks
                .iter()
                .map(|&(i, j)| CollisionPair::new(bodies[i % n], bodies[j % n]))
                .collect();

            // Reference outcome: batch order wins, equal values only
            let mut taken = HashSet::new();
            let mut expected_merges = 0u32;
            let mut expected_score = 0u64;
            for &(i, j) in &picks {
                let (i, j) = (i % n, j % n);
                if i == j || taken.contains(&i) || taken.contains(&j) || values[i] != values[j] {
                    continue;
                }
                taken.insert(i);
                taken.insert(j);
                expected_merges += 1;
                expected_score += merge_points(values[i] + 1);
            }

            let merges = resolve_merges(&mut state, &mut world, &pairs, &config);

            prop_assert_eq!(merges, expected_merges);
            prop_assert_eq!(state.dropped().len(), n - merges as usize);
            prop_assert_eq!(state.score(), expected_score);

            let survivors = ids
                .iter()
                .filter(|id| state.dropped().iter().any(|b| b.id == **id))
                .count();
            prop_assert_eq!(n - survivors, 2 * merges as usize);
            let fresh = state.dropped().len() - survivors;
            prop_assert_eq!(fresh, merges as usize);
        }
    }

    #[test]
    fn test_self_pair_is_ignored() {
        let (mut state, mut world, config) = setup();
        let a = drop_ball(&mut state, &mut world, &config, 2, Vec2::new(100.0, 100.0));
        let merges = resolve_merges(&mut state, &mut world, &[CollisionPair::new(a, a)], &config);
        assert_eq!(merges, 0);
        assert_eq!(state.dropped().len(), 1);
    }
}
