//! Real-time 2D arcade shooter: the player's ship survives waves of enemies
//! and bosses while collecting time-limited powerups.
//!
//! The simulation is pure Rust with no I/O. Drawing and keyboard access go
//! through the [`platform::Canvas`] and [`platform::Keyboard`] traits, which
//! the binary implements on top of a terminal.

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod platform;
pub mod render;
pub mod spawn;
pub mod tick;
pub mod vector;
pub mod weapon;
