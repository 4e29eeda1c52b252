//! Ambient canvas effects: a twinkling star-field and a glowing particle
//! emitter.
//!
//! Each surface is built from the same parts:
//! - a [`Palette`] resolved once from CSS theme tokens
//! - pixel-ratio aware sizing ([`scale`])
//! - an entity population ([`StarField`] or [`ParticleSystem`])
//! - a [`FrameLoop`] state machine driven by `requestAnimationFrame`
//!
//! The two surfaces never share state. Both honour the user's reduced-motion
//! preference by painting a single static frame.
//!
//! # Example
//!
//! ```ignore
//! use ambient_sky::{ParticlesCanvas, StarfieldCanvas};
//!
//! view! {
//!     <StarfieldCanvas />
//!     <section class="hero">
//!         <ParticlesCanvas />
//!     </section>
//! }
//! ```

mod component;
pub mod config;
pub mod error;
pub mod mount;
mod particles;
pub mod render;
pub mod scale;
mod starfield;
pub mod state;
pub mod theme;

pub use component::{ParticlesCanvas, StarfieldCanvas};
pub use config::AmbientConfig;
pub use particles::{Particle, ParticleSystem};
pub use starfield::{Star, StarField};
pub use state::{FrameLoop, FrameRequest, Phase, Scene};
pub use theme::{Color, Palette};
