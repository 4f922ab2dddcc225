//! Session settings read from a TOML manifest and overridden by flags.

use std::{collections::HashSet, fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tilequest_board::PlayerSetup;
use tilequest_core::PieceId;
use tilequest_system_turns::WormholeConfig;

const SUPPORTED_SETTINGS_VERSION: u32 = 1;
const DEFAULT_PLAYERS: u32 = 2;

/// Everything needed to seat players and roll for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    /// Number of dice rolled each turn.
    pub(crate) dice: u32,
    /// Seed for reproducible sessions; entropy is used when absent.
    pub(crate) seed: Option<u64>,
    /// Players in seating order.
    pub(crate) players: Vec<PlayerSetup>,
    /// Window random wormholes draw their displacement from.
    pub(crate) wormhole: WormholeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dice: 1,
            seed: None,
            players: numbered_players(DEFAULT_PLAYERS),
            wormhole: WormholeConfig::default(),
        }
    }
}

/// Values passed on the command line, which win over the manifest.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) players: Option<u32>,
    pub(crate) dice: Option<u32>,
    pub(crate) seed: Option<u64>,
}

impl Settings {
    /// Loads the manifest at `path`, if any, and applies the overrides.
    pub(crate) fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };
        if let Some(count) = overrides.players {
            if count == 0 {
                bail!("at least one player is required");
            }
            settings.players = numbered_players(count);
        }
        if let Some(dice) = overrides.dice {
            settings.dice = dice;
        }
        if overrides.seed.is_some() {
            settings.seed = overrides.seed;
        }
        Ok(settings)
    }

    /// Loads settings from the manifest at the provided path.
    pub(crate) fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        parse_settings(&contents)
            .with_context(|| format!("invalid settings at {}", path.display()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    version: u32,
    #[serde(default = "one_die")]
    dice: u32,
    seed: Option<u64>,
    #[serde(default)]
    players: Vec<ManifestPlayer>,
    wormhole: Option<ManifestWormhole>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestWormhole {
    min: i32,
    max: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestPlayer {
    name: String,
    piece: Option<u32>,
}

fn one_die() -> u32 {
    1
}

fn parse_settings(contents: &str) -> Result<Settings> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse settings toml contents")?;
    if manifest.version != SUPPORTED_SETTINGS_VERSION {
        bail!(
            "unsupported settings version {}; expected {}",
            manifest.version,
            SUPPORTED_SETTINGS_VERSION
        );
    }
    if manifest.players.is_empty() {
        bail!("settings must seat at least one player");
    }

    let mut seen = HashSet::with_capacity(manifest.players.len());
    let mut players = Vec::with_capacity(manifest.players.len());
    for (seat, player) in manifest.players.into_iter().enumerate() {
        let name = player.name.trim().to_owned();
        if name.is_empty() {
            bail!("player in seat {} has an empty name", seat + 1);
        }
        if !seen.insert(name.clone()) {
            bail!("settings seat `{name}` more than once");
        }
        let piece = player
            .piece
            .unwrap_or_else(|| u32::try_from(seat).unwrap_or(u32::MAX));
        players.push(PlayerSetup::new(name, PieceId::new(piece)));
    }

    let wormhole = match manifest.wormhole {
        Some(ManifestWormhole { min, max }) if min > max => {
            bail!("wormhole window {min}..={max} is empty");
        }
        Some(ManifestWormhole { min, max }) => WormholeConfig::new(min, max),
        None => WormholeConfig::default(),
    };

    Ok(Settings {
        dice: manifest.dice,
        seed: manifest.seed,
        players,
        wormhole,
    })
}

fn numbered_players(count: u32) -> Vec<PlayerSetup> {
    (0..count)
        .map(|seat| PlayerSetup::new(format!("Player {}", seat + 1), PieceId::new(seat)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_seats_players_in_order() {
        let manifest = r#"
            version = 1
            dice = 2
            seed = 42

            [[players]]
            name = "Ada"
            piece = 3

            [[players]]
            name = "Brook"
        "#;

        let settings = parse_settings(manifest).expect("settings parse");
        assert_eq!(settings.dice, 2);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(
            settings.players,
            vec![
                PlayerSetup::new("Ada", PieceId::new(3)),
                PlayerSetup::new("Brook", PieceId::new(1)),
            ]
        );
    }

    #[test]
    fn manifest_narrows_the_wormhole_window() {
        let manifest = r#"
            version = 1

            [wormhole]
            min = -3
            max = 4

            [[players]]
            name = "Ada"
        "#;
        let settings = parse_settings(manifest).expect("settings parse");
        assert_eq!(settings.wormhole.displacement_range(), (-3, 4));

        let defaulted = parse_settings("version = 1\n[[players]]\nname = \"Ada\"")
            .expect("settings parse");
        assert_eq!(defaulted.wormhole, WormholeConfig::default());
    }

    #[test]
    fn manifest_rejects_empty_wormhole_windows() {
        let manifest = r#"
            version = 1

            [wormhole]
            min = 5
            max = -5

            [[players]]
            name = "Ada"
        "#;
        let error = parse_settings(manifest).expect_err("inverted window");
        assert!(error.to_string().contains("wormhole window"), "{error}");
    }

    #[test]
    fn manifest_rejects_unknown_versions() {
        let manifest = r#"
            version = 2

            [[players]]
            name = "Ada"
        "#;
        let error = parse_settings(manifest).expect_err("version 2 is unsupported");
        assert!(error.to_string().contains("unsupported settings version"));
    }

    #[test]
    fn manifest_rejects_duplicate_names() {
        let manifest = r#"
            version = 1

            [[players]]
            name = "Ada"

            [[players]]
            name = " Ada "
        "#;
        assert!(parse_settings(manifest).is_err());
    }

    #[test]
    fn manifest_requires_players() {
        assert!(parse_settings("version = 1").is_err());
    }

    #[test]
    fn manifest_rejects_unknown_keys() {
        let manifest = r#"
            version = 1
            board = "classic"

            [[players]]
            name = "Ada"
        "#;
        assert!(parse_settings(manifest).is_err());
    }

    #[test]
    fn flags_override_defaults() {
        let overrides = Overrides {
            players: Some(3),
            dice: Some(2),
            seed: Some(9),
        };
        let settings = Settings::resolve(None, overrides).expect("settings resolve");
        assert_eq!(settings.players.len(), 3);
        assert_eq!(settings.players[2].name, "Player 3");
        assert_eq!(settings.dice, 2);
        assert_eq!(settings.seed, Some(9));
    }

    #[test]
    fn zero_players_are_rejected() {
        let overrides = Overrides {
            players: Some(0),
            ..Overrides::default()
        };
        assert!(Settings::resolve(None, overrides).is_err());
    }
}
