//! Donut simulation module
//!
//! Everything that moves lives here. This module must stay pure:
//! - One tick per frame, frame time passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod decoration;
pub mod donut;
pub mod physics;
pub mod playground;
pub mod pool;

pub use decoration::{Decoration, Speck, Sprinkle, generate_decoration};
pub use donut::{Donut, DonutId};
pub use physics::{PhysicsParams, apply_impulse, ease_squash, step};
pub use playground::{Playground, PlaygroundEvent};
pub use pool::DonutPool;
