//! DOM element ids and HUD text
//!
//! Each game looks for `<prefix>-canvas` (or a `<prefix>-game` container to
//! mount a canvas into) and writes its score and lives to `<prefix>-score`
//! and `<prefix>-lives` when those elements exist.

use crate::sim::{GameEvent, GameKind};

/// Element ids a game uses on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomIds {
    pub canvas: String,
    pub container: String,
    pub score: String,
    pub lives: String,
}

impl DomIds {
    pub fn for_kind(kind: GameKind) -> Self {
        let prefix = kind.dom_prefix();
        Self {
            canvas: format!("{prefix}-canvas"),
            container: format!("{prefix}-game"),
            score: format!("{prefix}-score"),
            lives: format!("{prefix}-lives"),
        }
    }
}

/// Set `element_id`'s text content to `text`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudUpdate {
    pub element_id: String,
    pub text: String,
}

impl HudUpdate {
    fn new(element_id: &str, text: String) -> Self {
        Self {
            element_id: element_id.to_string(),
            text,
        }
    }
}

/// HUD text for a freshly mounted game
pub fn initial(ids: &DomIds, score: u64, lives: u8) -> Vec<HudUpdate> {
    vec![
        HudUpdate::new(&ids.score, format!("Score: {score}")),
        HudUpdate::new(&ids.lives, format!("Lives: {lives}")),
    ]
}

/// Collapse a batch of events into the writes needed, latest value wins
pub fn updates_for(ids: &DomIds, events: &[GameEvent]) -> Vec<HudUpdate> {
    let mut score = None;
    let mut lives = None;
    for event in events {
        match event {
            GameEvent::ScoreChanged(s) => score = Some(*s),
            GameEvent::LivesChanged(l) => lives = Some(*l),
            GameEvent::LevelCleared | GameEvent::WaveAdvanced(_) | GameEvent::GameOver => {}
        }
    }

    let mut out = Vec::new();
    if let Some(s) = score {
        out.push(HudUpdate::new(&ids.score, format!("Score: {s}")));
    }
    if let Some(l) = lives {
        out.push(HudUpdate::new(&ids.lives, format!("Lives: {l}")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_per_game() {
        let ids = DomIds::for_kind(GameKind::Platformer);
        assert_eq!(ids.canvas, "mario-canvas");
        assert_eq!(ids.container, "mario-game");
        assert_eq!(DomIds::for_kind(GameKind::Maze).score, "pacman-score");
        assert_eq!(DomIds::for_kind(GameKind::Invaders).lives, "invaders-lives");
    }

    #[test]
    fn test_latest_values_win() {
        let ids = DomIds::for_kind(GameKind::Maze);
        let events = [
            GameEvent::ScoreChanged(10),
            GameEvent::LivesChanged(2),
            GameEvent::ScoreChanged(20),
            GameEvent::GameOver,
        ];
        let updates = updates_for(&ids, &events);
        assert_eq!(
            updates,
            vec![
                HudUpdate::new("pacman-score", "Score: 20".into()),
                HudUpdate::new("pacman-lives", "Lives: 2".into()),
            ]
        );
    }

    #[test]
    fn test_no_events_no_writes() {
        let ids = DomIds::for_kind(GameKind::Invaders);
        assert!(updates_for(&ids, &[GameEvent::WaveAdvanced(2)]).is_empty());
        assert_eq!(initial(&ids, 0, 3)[1].text, "Lives: 3");
    }
}
