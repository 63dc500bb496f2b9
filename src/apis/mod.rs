pub mod config;
pub mod tags;

// Re-export all APIs
pub use config::ConfigApi;
pub use tags::TagsApi;
