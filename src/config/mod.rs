pub mod settings;

pub use settings::{Settings, AppSettings, Environment, ProviderSettings, CacheSettings};
