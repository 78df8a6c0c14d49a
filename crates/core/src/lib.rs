pub mod command;
pub mod container;
pub mod event;
pub mod intent;

pub use command::*;
pub use container::*;
pub use event::*;
pub use intent::*;
