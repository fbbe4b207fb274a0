//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and
//! [`TerminalRenderer`] flushes framebuffers to the terminal, emitting only the
//! glyph runs that changed since the previous frame.
//!
//! Board cells are two columns wide to compensate for the usual terminal glyph
//! aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
