mod configuration_error;
mod external_service_error;
mod jackpot_error;
mod session_error;

pub use configuration_error::ConfigurationError;
pub use external_service_error::ExternalServiceError;
pub use jackpot_error::{JackpotError, JackpotResult};
pub use session_error::SessionError;
