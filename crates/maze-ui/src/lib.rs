//! **maze-ui**: front-end plumbing for driving and drawing an explorer.
//!
//! This crate provides a styled cell [`Screen`] with frame diffing, the
//! input vocabulary ([`Msg`], [`Key`]), and the Elm-architecture run loop
//! ([`Model`], [`Driver`], [`App`]) that polls input, emits periodic
//! [`Msg::Tick`]s and flushes only changed cells.

pub mod app;
pub mod messages;
pub mod screen;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model};
pub use messages::{Key, ModMask, Msg};
pub use screen::{Cell, Frame, FrameCell, Screen, compute_frame};
pub use style::{AttrMask, Color, Style};
