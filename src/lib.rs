#[macro_use]
extern crate tracing;

pub mod assignment;
pub mod export;
pub mod interactive;
pub mod render;
pub mod session;
pub mod utils;

pub mod proposition;
pub use proposition::*;

pub mod variable;
pub use variable::*;

pub mod tree;
pub use tree::*;


pub use assignment::{Assignment, DEFAULT_MAX_VARIABLES};
pub use render::Format;
pub use session::{Session, SessionError};
