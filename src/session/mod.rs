pub mod gate;
pub mod guard;

pub use gate::*;
pub use guard::*;
