//! Terminal presentation for blockfall.
//!
//! Rendering is split in two steps: [`GameView`] turns a snapshot into a
//! [`FrameBuffer`] without touching the terminal, and [`TerminalRenderer`]
//! pushes framebuffers to the real terminal through crossterm.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{changed_rows, encode_changed_rows_into, encode_full_into, TerminalRenderer};
