//! Shared test utilities

mod mock_platform;

pub use mock_platform::{CreatePrCall, MockRepoService, PutFileCall};
