//! Engine tunables, read from the environment with compiled-in defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{HANDLE_THRESHOLD, INDEX_PADDING, QUADTREE_CAPACITY, QUADTREE_MAX_DEPTH};

const ENV_HANDLE_THRESHOLD: &str = "SKETCHPAD_HANDLE_THRESHOLD";
const ENV_QUADTREE_CAPACITY: &str = "SKETCHPAD_QUADTREE_CAPACITY";
const ENV_QUADTREE_MAX_DEPTH: &str = "SKETCHPAD_QUADTREE_MAX_DEPTH";
const ENV_INDEX_PADDING: &str = "SKETCHPAD_INDEX_PADDING";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Pick radius for resize handles, in world units.
    pub handle_threshold: f64,
    /// Shapes a quadtree node holds before it splits.
    pub quadtree_capacity: usize,
    pub quadtree_max_depth: usize,
    /// Margin added around the document extent when sizing the index root.
    pub index_padding: f64,
}

impl EngineConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build from an arbitrary key lookup. Missing or unparsable values fall
    /// back to the defaults.
    #[must_use]
    pub fn from_lookup<F, E>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, E>,
    {
        let config = Self {
            handle_threshold: env_parse(&lookup, ENV_HANDLE_THRESHOLD, HANDLE_THRESHOLD),
            quadtree_capacity: env_parse(&lookup, ENV_QUADTREE_CAPACITY, QUADTREE_CAPACITY),
            quadtree_max_depth: env_parse(&lookup, ENV_QUADTREE_MAX_DEPTH, QUADTREE_MAX_DEPTH),
            index_padding: env_parse(&lookup, ENV_INDEX_PADDING, INDEX_PADDING),
        };
        tracing::debug!(?config, "engine config loaded");
        config
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handle_threshold: HANDLE_THRESHOLD,
            quadtree_capacity: QUADTREE_CAPACITY,
            quadtree_max_depth: QUADTREE_MAX_DEPTH,
            index_padding: INDEX_PADDING,
        }
    }
}

fn env_parse<T, F, E>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
    F: Fn(&str) -> Result<String, E>,
{
    let Ok(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config value");
            default
        }
    }
}
