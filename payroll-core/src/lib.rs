pub mod backend;
pub mod bulk;
pub mod calculations;
pub mod models;
pub mod payslip;
pub mod serde_lenient;
pub mod validation;

pub use backend::{BackendError, PayrollBackend};
pub use models::*;
