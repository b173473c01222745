//! Reusable HTML building blocks.
//!
//! - [`badge`]: topic and status tags
//! - [`submit_button`]: form buttons with variants
//! - [`card`], [`card_with_header`]: panel containers

mod badge;
mod button;
mod card;

pub use badge::{badge, colored_badge};
pub use button::{ButtonVariant, submit_button};
pub use card::{card, card_with_header};
