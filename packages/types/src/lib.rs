pub use anyhow::{Error, Result, anyhow, bail};
pub use async_trait::async_trait;
pub use rand;
pub use schemars::JsonSchema;
pub use tokio;

pub mod utils;

pub mod json {
    pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
    pub use serde_json::*;
}

pub mod sync {
    pub use parking_lot::{Mutex, RwLock};
}
