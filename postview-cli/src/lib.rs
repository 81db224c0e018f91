use std::sync::atomic::AtomicBool;

pub mod ctx;
pub mod list;
pub mod screen;
pub mod stdio;

pub static DONE: AtomicBool = AtomicBool::new(false);
