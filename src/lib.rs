pub mod config;
pub mod error;
pub mod gateway;
pub mod level;
pub mod server;
pub mod simplify;

pub use config::AppConfig;
pub use error::{GatewayError, ServiceError};
pub use gateway::{ModelGateway, OllamaGateway};
pub use level::ProficiencyLevel;
pub use server::build_router;
pub use simplify::{SimplificationRequest, SimplificationResult};
