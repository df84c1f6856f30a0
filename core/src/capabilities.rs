use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineFeatures {
    pub parallel: bool,
}

pub fn engine_features() -> EngineFeatures {
    EngineFeatures {
        parallel: cfg!(feature = "parallel"),
    }
}
