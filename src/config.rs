//! Runtime configuration.

use std::env;

use crate::error::TransformError;

/// Environment variable overriding the concurrency cap.
pub const CONCURRENCY_ENV: &str = "GEOTRANSFORM_CONCURRENCY";

/// Settings shared by the compute backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformConfig {
    /// Upper bound on worker threads. 0 uses every hardware thread,
    /// 1 runs synchronously on the calling thread.
    pub concurrency_cap: usize,
}

impl TransformConfig {
    pub fn sequential() -> Self {
        Self { concurrency_cap: 1 }
    }

    pub fn with_concurrency_cap(mut self, cap: usize) -> Self {
        self.concurrency_cap = cap;
        self
    }

    /// Default configuration with `GEOTRANSFORM_CONCURRENCY` applied if set.
    pub fn from_env() -> Result<Self, TransformError> {
        match env::var(CONCURRENCY_ENV) {
            Ok(raw) => Ok(Self::default().with_concurrency_cap(parse_concurrency(&raw)?)),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(e) => {
                log::warn!("unreadable {CONCURRENCY_ENV}: {e}");
                Err(TransformError::Config(format!("{CONCURRENCY_ENV}: {e}")))
            }
        }
    }
}

fn parse_concurrency(raw: &str) -> Result<usize, TransformError> {
    raw.trim().parse::<usize>().map_err(|e| {
        log::warn!("invalid {CONCURRENCY_ENV}={raw:?}: {e}");
        TransformError::Config(format!("{CONCURRENCY_ENV}={raw:?}: {e}"))
    })
}
