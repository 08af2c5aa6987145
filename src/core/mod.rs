// Domain-layer modules and shared errors/models
pub mod contact {
    pub use crate::contact::*;
}

pub mod models {
    pub use crate::models::*;
}

pub mod sync {
    pub use crate::sync::*;
}

pub mod errors {
    pub use crate::errors::*;
}
