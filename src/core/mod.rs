pub mod extract;
pub mod filter;
pub mod monitor;
pub mod notify;
pub mod portal;

pub use crate::domain::model::{Tramite, TramiteMatch};
pub use crate::domain::ports::Notifier;
pub use crate::utils::error::Result;
