//! Outbound ports - Interfaces that the application requires from external systems

mod llm_port;
mod repository_port;

pub use llm_port::{ContentGenerator, GeneratorError};
pub use repository_port::{GameStore, GameUnitOfWork, PersistenceError};
