/// Context profile definitions and TOML loading
pub mod profile;

pub use profile::ContextProfile;
