pub mod choices;
pub mod deserialize;
pub mod response;

pub use choices::ChoiceOption;
pub use deserialize::{deserialize_optional_f64, deserialize_optional_i64};
pub use response::{ApiResponse, HealthResponse};
