pub mod fakes;
pub mod fixtures;

pub use fakes::FakeSchemaReader;
pub use fixtures::{app_config, users_reader};
