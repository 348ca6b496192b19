//! Keyboard input: bindable actions and their key-string lookup.

mod keyboard;

pub use keyboard::KeyAction;
