pub mod memory;
pub mod snapshot;
pub mod traits;

pub use memory::*;
pub use snapshot::*;
pub use traits::*;
