pub mod classifiers;
pub mod core;
pub mod readers;
pub mod render;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
