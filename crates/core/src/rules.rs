//! Gameplay tuning values.

use serde::{Deserialize, Serialize};

use crate::types::{
    AUTO_REPEAT_MS, DELAYED_AUTO_SHIFT_MS, FLASH_MS, LOCK_ALLOWED_MOVES, LOCK_ALLOWED_TIME_MS,
    NEXT_QUEUE_LENGTH, SOFT_DROP_DIVISOR,
};

/// Tunable rules of a session. Defaults are the guideline values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rules {
    pub delayed_auto_shift_ms: u32,
    pub auto_repeat_ms: u32,
    pub lock_allowed_moves: u8,
    pub lock_allowed_time_ms: i32,
    pub next_queue_length: usize,
    /// Soft drop falls this many times faster than gravity
    pub soft_drop_divisor: u32,
    pub flash_ms: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            delayed_auto_shift_ms: DELAYED_AUTO_SHIFT_MS,
            auto_repeat_ms: AUTO_REPEAT_MS,
            lock_allowed_moves: LOCK_ALLOWED_MOVES,
            lock_allowed_time_ms: LOCK_ALLOWED_TIME_MS,
            next_queue_length: NEXT_QUEUE_LENGTH,
            soft_drop_divisor: SOFT_DROP_DIVISOR,
            flash_ms: FLASH_MS,
        }
    }
}

impl Rules {
    /// Defaults overridden by `TETRIS_*` environment variables.
    ///
    /// Unset or unparsable variables keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(
            lookup: &impl Fn(&str) -> Option<String>,
            key: &str,
            default: T,
        ) -> T {
            lookup(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        }

        let defaults = Self::default();
        let rules = Self {
            delayed_auto_shift_ms: parse(&lookup, "TETRIS_DAS_MS", defaults.delayed_auto_shift_ms),
            auto_repeat_ms: parse(&lookup, "TETRIS_ARR_MS", defaults.auto_repeat_ms),
            lock_allowed_moves: parse(&lookup, "TETRIS_LOCK_MOVES", defaults.lock_allowed_moves),
            lock_allowed_time_ms: parse(
                &lookup,
                "TETRIS_LOCK_TIME_MS",
                defaults.lock_allowed_time_ms,
            ),
            next_queue_length: parse(&lookup, "TETRIS_NEXT_QUEUE", defaults.next_queue_length),
            soft_drop_divisor: parse(
                &lookup,
                "TETRIS_SOFT_DROP_DIVISOR",
                defaults.soft_drop_divisor,
            ),
            flash_ms: parse(&lookup, "TETRIS_FLASH_MS", defaults.flash_ms),
        };
        rules.sanitized()
    }

    /// Clamp values that would stall the game.
    pub fn sanitized(mut self) -> Self {
        self.auto_repeat_ms = self.auto_repeat_ms.max(1);
        self.lock_allowed_moves = self.lock_allowed_moves.max(1);
        self.soft_drop_divisor = self.soft_drop_divisor.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_guideline() {
        let rules = Rules::default();
        assert_eq!(rules.delayed_auto_shift_ms, 300);
        assert_eq!(rules.auto_repeat_ms, 20);
        assert_eq!(rules.lock_allowed_moves, 15);
        assert_eq!(rules.lock_allowed_time_ms, 500);
        assert_eq!(rules.next_queue_length, 6);
    }

    #[test]
    fn test_env_overrides_and_ignores_garbage() {
        let rules = Rules::from_lookup(lookup(&[
            ("TETRIS_DAS_MS", "170"),
            ("TETRIS_ARR_MS", "0"),
            ("TETRIS_LOCK_MOVES", "many"),
            ("TETRIS_NEXT_QUEUE", " 3 "),
        ]));
        assert_eq!(rules.delayed_auto_shift_ms, 170);
        assert_eq!(rules.auto_repeat_ms, 1, "zero repeat is clamped");
        assert_eq!(rules.lock_allowed_moves, 15);
        assert_eq!(rules.next_queue_length, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let rules: Rules = serde_json::from_str(r#"{"lockAllowedTimeMs": 1000}"#).unwrap();
        assert_eq!(rules.lock_allowed_time_ms, 1000);
        assert_eq!(rules.flash_ms, 2000);
    }
}
