//! Game rules module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed physics timestep only
//! - Seeded RNG only
//! - Stable iteration order (by creation id)
//! - No rendering or platform dependencies

pub mod arena;
pub mod input;
pub mod merge;
pub mod monitor;
pub mod physics;
pub mod queue;
pub mod state;
pub mod tick;

pub use arena::Arena;
pub use input::{InputState, Intent, TouchControl};
pub use merge::{merge_points, resolve_merges};
pub use monitor::{DwellStatus, GameOverMonitor, touches_line};
pub use physics::{BodyId, CircleOptions, CollisionPair, PhysicsWorld, RapierWorld};
pub use queue::LookaheadQueue;
pub use state::{Ball, BallPhase, GameEvent, GamePhase, GameState};
pub use tick::{BallSnapshot, Game};
