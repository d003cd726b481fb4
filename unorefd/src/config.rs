use std::{env::var, time::Duration};

use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use unoref::{config::GameConfig, player::PlayerId};

const DEFAULT_PLAYERS: &str = "Mark,Talha,Volkan";
const DEFAULT_FORGET_UNO_CHANCE: f64 = 0.25;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub players: Vec<PlayerId>,
    pub game: GameConfig,
    /// Chance that a bot on its last card does not call UNO.
    pub forget_uno_chance: f64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let players = lookup("UNOREF_PLAYERS")
            .unwrap_or_else(|| DEFAULT_PLAYERS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(String::from)
            .collect();

        let mut game = GameConfig::default();
        if let Some(seed) = lookup("UNOREF_SEED") {
            game.seed = Some(seed.parse().wrap_err("UNOREF_SEED must be an integer")?);
        }
        if let Some(pause) = lookup("UNOREF_NOTICE_PAUSE_MS") {
            let millis = pause
                .parse()
                .wrap_err("UNOREF_NOTICE_PAUSE_MS must be a number of milliseconds")?;
            game.notice_pause = Duration::from_millis(millis);
        }

        let forget_uno_chance = match lookup("UNOREF_FORGET_UNO") {
            Some(chance) => chance
                .parse()
                .wrap_err("UNOREF_FORGET_UNO must be a probability")?,
            None => DEFAULT_FORGET_UNO_CHANCE,
        };
        if !(0.0..=1.0).contains(&forget_uno_chance) {
            return Err(eyre!("UNOREF_FORGET_UNO must be between 0 and 1"));
        }

        Ok(Self {
            players,
            game,
            forget_uno_chance,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.players, vec!["Mark", "Talha", "Volkan"]);
        assert_eq!(config.game.seed, None);
        assert_eq!(config.game.notice_pause, Duration::from_secs(1));
        assert_eq!(config.forget_uno_chance, DEFAULT_FORGET_UNO_CHANCE);
    }

    #[test]
    fn reads_every_setting() {
        let config = config_from(&[
            ("UNOREF_PLAYERS", " Ann, Bo ,,Cy "),
            ("UNOREF_SEED", "99"),
            ("UNOREF_NOTICE_PAUSE_MS", "250"),
            ("UNOREF_FORGET_UNO", "0"),
        ])
        .unwrap();

        assert_eq!(config.players, vec!["Ann", "Bo", "Cy"]);
        assert_eq!(config.game.seed, Some(99));
        assert_eq!(config.game.notice_pause, Duration::from_millis(250));
        assert_eq!(config.forget_uno_chance, 0.0);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(config_from(&[("UNOREF_SEED", "abc")]).is_err());
        assert!(config_from(&[("UNOREF_FORGET_UNO", "1.5")]).is_err());
    }
}
