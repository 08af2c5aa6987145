//! External service integrations.

pub mod ghl_client {
    pub use crate::ghl_client::*;
}
