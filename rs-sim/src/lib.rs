//! Player movement, collision and the seat/display interaction state machine.
//!
//! Everything here is engine-agnostic apart from borrowing bevy's math and key types, so the
//! client drives it from a system and tests drive it directly.

pub mod collider;
pub mod collision;
pub mod context;
pub mod display;
pub mod footsteps;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod settings;
pub mod types;

#[cfg(test)]
mod tests;

/// Slack used when comparing accumulated tick time against a duration.
pub const TIMER_EPS: f32 = 1e-5;

pub use collider::{Collider, ColliderRegistry, ModelBounds, Placement};
pub use collision::{COLLISION_EPS, max_penetration, resolve};
pub use context::{SimContext, SimSnapshot, TickOutcome};
pub use display::{DisplayPhase, DisplayPowerState};
pub use footsteps::{FootstepCue, FootstepParams};
pub use input::{InputSampler, KeyAction, KeyBindings};
pub use interaction::{InteractionMachine, InteractionMode};
pub use physics::{MovementParams, integrate};
pub use settings::{SimSettings, scene_colliders};
pub use types::{Actions, CameraRig, InputIntent, PlayerState, SeatAnchor};
