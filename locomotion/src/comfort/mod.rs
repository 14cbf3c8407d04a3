// Comfort features that mask abrupt viewpoint changes.

pub mod blink;

pub use blink::{Blink, Eyelids};
