//! Storage layer - page frames and the on-disk swap store.

mod frame;
mod swap_store;

pub use frame::Frame;
pub use swap_store::SwapStore;
