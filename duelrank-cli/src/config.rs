/// Config file loading and creation for the duelrank CLI.
///
/// Config lives at ~/.config/duelrank/config.toml. Every table is optional;
/// anything missing falls back to the built-in demo profile, so the tool
/// works out of the box.
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use duelrank_core::{Labeled, Profile};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct DuelrankConfig {
    pub items: Option<Vec<String>>,
    pub segments: Option<Vec<Labeled>>,
    pub contexts: Option<Vec<Labeled>>,
    pub initial_rating: Option<f64>,
    pub k_factor: Option<f64>,
    pub top_n: Option<usize>,
}

/// Built-in demo profile: busy multiplayer games, rated by player type and
/// decision question. `duelrank init` writes the same data as a starter
/// config to edit.
const DEMO_ITEMS: [&str; 20] = [
    "Fortnite",
    "Call of Duty: Warzone",
    "Grand Theft Auto V",
    "Roblox",
    "Minecraft",
    "EA SPORTS FC 26",
    "NBA 2K26",
    "UFC 5",
    "It Takes Two",
    "Forza Horizon 5",
    "Avatar: Frontiers of Pandora",
    "Hogwarts Legacy",
    "Battlefield 6",
    "Fallout 4",
    "The Witcher 3: Wild Hunt",
    "Among Us",
    "Rocket League",
    "Tom Clancy's Rainbow Six Siege",
    "eFootball",
    "Marvel Rivals",
];

const DEMO_SEGMENTS: [(&str, &str); 6] = [
    ("CAS", "Casual (plays now and then)"),
    ("COMP", "Competitive (ranked / online)"),
    ("COOP", "Co-op with friends (party)"),
    ("HIS", "Story / solo (campaign)"),
    ("F2P", "Prefers free-to-play"),
    ("NEW", "New to the platform"),
];

const DEMO_CONTEXTS: [(&str, &str); 5] = [
    ("CONC", "Which feels busier today (people online, quick matches)?"),
    ("AMIG", "Which would you recommend for playing with friends?"),
    ("COMP", "Which would you recommend for competing online?"),
    ("REL", "Which would you recommend to relax, no stress?"),
    ("HIST", "Which would you recommend for a story campaign?"),
];

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# duelrank configuration
# Every table is optional. Delete one to fall back to the built-in demo
# profile; tuning values below show the defaults.

# initial_rating = 1000.0
# k_factor = 32.0
# top_n = 10

items = [
    "Fortnite",
    "Call of Duty: Warzone",
    "Grand Theft Auto V",
    "Roblox",
    "Minecraft",
    "EA SPORTS FC 26",
    "NBA 2K26",
    "UFC 5",
    "It Takes Two",
    "Forza Horizon 5",
    "Avatar: Frontiers of Pandora",
    "Hogwarts Legacy",
    "Battlefield 6",
    "Fallout 4",
    "The Witcher 3: Wild Hunt",
    "Among Us",
    "Rocket League",
    "Tom Clancy's Rainbow Six Siege",
    "eFootball",
    "Marvel Rivals",
]

[[segments]]
id = "CAS"
label = "Casual (plays now and then)"

[[segments]]
id = "COMP"
label = "Competitive (ranked / online)"

[[segments]]
id = "COOP"
label = "Co-op with friends (party)"

[[segments]]
id = "HIS"
label = "Story / solo (campaign)"

[[segments]]
id = "F2P"
label = "Prefers free-to-play"

[[segments]]
id = "NEW"
label = "New to the platform"

[[contexts]]
id = "CONC"
label = "Which feels busier today (people online, quick matches)?"

[[contexts]]
id = "AMIG"
label = "Which would you recommend for playing with friends?"

[[contexts]]
id = "COMP"
label = "Which would you recommend for competing online?"

[[contexts]]
id = "REL"
label = "Which would you recommend to relax, no stress?"

[[contexts]]
id = "HIST"
label = "Which would you recommend for a story campaign?"
"#;

/// Returns the default config path: ~/.config/duelrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("duelrank").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if the file
/// doesn't exist.
pub fn load_config(path: &Path) -> DuelrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DuelrankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

fn demo_labeled(entries: &[(&str, &str)]) -> Vec<Labeled> {
    entries
        .iter()
        .map(|(id, label)| Labeled {
            id: id.to_string(),
            label: label.to_string(),
        })
        .collect()
}

/// Turn a config into a validated ranking profile, filling gaps from the
/// demo profile. Config mistakes are user errors, so they bail with a
/// message instead of panicking inside the core.
pub fn load_profile(path: &Path) -> Profile {
    let cfg = load_config(path);

    let items = cfg
        .items
        .unwrap_or_else(|| DEMO_ITEMS.iter().map(|s| s.to_string()).collect());
    let segments = cfg.segments.unwrap_or_else(|| demo_labeled(&DEMO_SEGMENTS));
    let contexts = cfg.contexts.unwrap_or_else(|| demo_labeled(&DEMO_CONTEXTS));

    if items.len() < 2 {
        bail(format!("Need at least 2 items to rank, got {}", items.len()));
    }
    if segments.is_empty() {
        bail("Config must define at least one segment.");
    }
    if contexts.is_empty() {
        bail("Config must define at least one context.");
    }
    check_unique("item", items.iter());
    check_unique("segment id", segments.iter().map(|s| &s.id));
    check_unique("context id", contexts.iter().map(|c| &c.id));

    let mut profile = Profile::new(&items, segments, contexts);
    if let Some(rating) = cfg.initial_rating {
        profile.initial_rating = rating;
    }
    if let Some(k) = cfg.k_factor {
        profile.k_factor = k;
    }
    if let Some(n) = cfg.top_n {
        profile.top_n = n;
    }
    profile
}

fn check_unique<'a>(kind: &str, values: impl Iterator<Item = &'a String>) {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            bail(format!("Duplicate {kind} in config: \"{value}\""));
        }
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_matches_demo_profile() {
        let cfg: DuelrankConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();

        let items = cfg.items.unwrap();
        assert_eq!(items.len(), DEMO_ITEMS.len());
        assert_eq!(items[0], "Fortnite");

        let segments = cfg.segments.unwrap();
        assert_eq!(segments.len(), DEMO_SEGMENTS.len());
        assert_eq!(segments[0].id, "CAS");

        let contexts = cfg.contexts.unwrap();
        assert_eq!(contexts.len(), DEMO_CONTEXTS.len());
        assert_eq!(contexts[0].id, "CONC");

        // Tuning values stay commented out in the template.
        assert!(cfg.initial_rating.is_none());
        assert!(cfg.k_factor.is_none());
        assert!(cfg.top_n.is_none());
    }

    #[test]
    fn test_missing_file_falls_back_to_demo() {
        let dir = tempfile::tempdir().unwrap();
        let profile = load_profile(&dir.path().join("nope.toml"));

        assert_eq!(profile.catalog.len(), 20);
        assert_eq!(profile.segments.len(), 6);
        assert_eq!(profile.contexts.len(), 5);
        assert_eq!(profile.initial_rating, 1000.0);
        assert_eq!(profile.k_factor, 32.0);
    }

    #[test]
    fn test_partial_config_overrides_tuning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "items = [\"left\", \"right\"]\nk_factor = 24.0\ntop_n = 5\n",
        )
        .unwrap();

        let profile = load_profile(&path);
        assert_eq!(profile.catalog.len(), 2);
        assert_eq!(profile.k_factor, 24.0);
        assert_eq!(profile.top_n, 5);
        // Segments not configured: demo set still applies.
        assert_eq!(profile.segments.len(), 6);
    }
}
