pub mod aggregate;
pub mod filter;
pub mod mutate;
pub mod resolve;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use aggregate::*;
pub use filter::*;
pub use mutate::*;
pub use resolve::*;
pub use validate::*;
