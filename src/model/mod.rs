pub mod athlete;
pub mod coach;
pub mod common;
pub mod event;
pub mod group;
pub mod school;
pub mod user_context;

pub use athlete::*;
pub use coach::*;
pub use common::*;
pub use event::*;
pub use group::*;
pub use school::*;
pub use user_context::*;
