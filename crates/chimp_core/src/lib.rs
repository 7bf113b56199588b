pub mod input;
pub mod rect;
pub mod sprite;
pub mod surface;
pub mod time;

pub use rect::Rect;
pub use sprite::{FrameContext, Sprite};
pub use surface::{Rgb, Surface};
