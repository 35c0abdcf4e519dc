mod button;
mod checkbox;

pub use button::{ButtonKind, button};
pub use checkbox::checkbox;
