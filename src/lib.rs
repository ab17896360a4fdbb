#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod ai;
mod board;
mod common;
mod config;
mod fleet;
mod game;
mod moves;
mod player;
mod ship;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod service;
#[cfg(feature = "std")]
pub mod store;

pub use ai::*;
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use moves::*;
pub use player::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use service::{MatchService, ServiceError, TurnReport};
#[cfg(feature = "std")]
pub use store::{InMemoryStore, MatchStore, StoreError};
