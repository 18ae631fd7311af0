pub mod registry;

pub use registry::CallRegistry;
pub use registry::RegistryError;
