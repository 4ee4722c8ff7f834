//! Entity linker adapters.

pub mod spotlight;

pub use spotlight::SpotlightLinker;
