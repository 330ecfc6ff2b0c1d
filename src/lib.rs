//! Particle tree library
//!
//! A particle Christmas tree that bursts into a scattered cloud and reassembles
//! on click: formation samplers, the particle field animator, and the Bevy
//! plugins that host them.

pub mod animator;
pub mod config;
pub mod constants;
pub mod error;
pub mod formation;
pub mod geometry;
pub mod graphics;
pub mod particle;
pub mod scene;
pub mod star;
