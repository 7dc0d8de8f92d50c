//! Engine tuning read from the environment once at startup.

use std::env;

use crate::domain::win::WinPolicy;
use crate::error::AppError;

pub const DEFAULT_MAX_TURNS: u32 = 40;
pub const DEFAULT_PARTICLE_COUNT: u32 = 6;
const MAX_PARTICLE_COUNT: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Turn budget before a session times out with no winner.
    pub max_turns: u32,
    /// Particles placed when a session starts.
    pub particle_count: u32,
    pub win_policy: WinPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            win_policy: WinPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Read `ENGINE_MAX_TURNS`, `ENGINE_PARTICLE_COUNT` and `ENGINE_WIN_POLICY`.
    /// Unset variables keep their defaults; malformed ones are config errors.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let max_turns = match lookup("ENGINE_MAX_TURNS") {
            Some(raw) => parse_bounded("ENGINE_MAX_TURNS", &raw, 1, u32::MAX)?,
            None => defaults.max_turns,
        };
        let particle_count = match lookup("ENGINE_PARTICLE_COUNT") {
            Some(raw) => parse_bounded("ENGINE_PARTICLE_COUNT", &raw, 1, MAX_PARTICLE_COUNT)?,
            None => defaults.particle_count,
        };
        let win_policy = match lookup("ENGINE_WIN_POLICY") {
            Some(raw) => raw
                .parse::<WinPolicy>()
                .map_err(|e| AppError::config(format!("ENGINE_WIN_POLICY: {e}")))?,
            None => defaults.win_policy,
        };

        Ok(Self {
            max_turns,
            particle_count,
            win_policy,
        })
    }
}

fn parse_bounded(key: &str, raw: &str, min: u32, max: u32) -> Result<u32, AppError> {
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("{key} must be an integer, got '{raw}'")))?;
    if !(min..=max).contains(&value) {
        return Err(AppError::config(format!(
            "{key} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}
