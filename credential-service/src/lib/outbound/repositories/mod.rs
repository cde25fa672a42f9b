pub mod in_memory;
pub mod principal;

pub use in_memory::InMemoryPrincipalRepository;
pub use principal::PostgresPrincipalRepository;
