#![forbid(unsafe_code)]

//! Inklet public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub use inklet_model::{Post, Profile, Theme, User};
pub use inklet_reactive::{Derived, Store, Subscription};
pub use inklet_state::AppState;

pub mod prelude {
    pub use inklet_model as model;
    pub use inklet_reactive as reactive;
    pub use inklet_state as state;
}
