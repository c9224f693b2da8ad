//! Reading a game's configuration from its canvas attributes

use crate::sim::{GameKind, Session, Variant, new_game_with};
use crate::tuning::GameTuning;

/// `data-variant`
pub const VARIANT_ATTR: &str = "data-variant";
/// `data-tuning`, a partial JSON override of the variant's tuning
pub const TUNING_ATTR: &str = "data-tuning";

#[derive(Debug, Clone, PartialEq)]
pub struct MountConfig {
    pub variant: Variant,
    pub tuning: GameTuning,
}

impl MountConfig {
    /// Resolve attributes, falling back to defaults on anything unreadable
    pub fn from_attributes(kind: GameKind, variant: Option<&str>, tuning: Option<&str>) -> Self {
        let variant = match variant {
            Some(raw) => Variant::from_str(raw).unwrap_or_else(|| {
                log::warn!("Unknown {VARIANT_ATTR} {raw:?} on {kind:?}, using default");
                Variant::default()
            }),
            None => Variant::default(),
        };

        let preset = GameTuning::preset(kind, variant);
        let tuning = match tuning.map(str::trim).filter(|t| !t.is_empty()) {
            Some(raw) => preset.with_overrides(raw).unwrap_or_else(|e| {
                log::warn!("Ignoring {TUNING_ATTR} on {kind:?}: {e}");
                preset.clone()
            }),
            None => preset,
        };

        Self { variant, tuning }
    }

    pub fn kind(&self) -> GameKind {
        self.tuning.kind()
    }

    pub fn session(&self, seed: u64) -> Session {
        Session::from_game(new_game_with(self.variant, self.tuning.clone(), seed))
    }
}
