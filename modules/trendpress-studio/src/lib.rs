pub mod auto_content;
pub mod brief;
pub mod discovery;
pub mod generate;
pub mod magnets;
pub mod scoring;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
