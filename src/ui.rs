//! Display model for the tracker screen
//!
//! Pure functions from roster/shuffle state to what the page shows. The DOM
//! layer in `main.rs` only copies these values into elements.

use crate::consts::{LETTER_COUNT, MIN_SHUFFLE_PLAYERS};
use crate::roster::{Letter, Player, PlayerId};
use crate::settings::Locale;
use crate::shuffle::ShufflePhase;

/// Marker shown on a failed letter
pub const FAILED_MARK: char = 'X';

/// User-facing strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub title: &'static str,
    pub name_placeholder: &'static str,
    pub add: &'static str,
    pub shuffle: &'static str,
    pub shuffling: &'static str,
    pub eliminated: &'static str,
    pub delete: &'static str,
    pub winner: &'static str,
}

const PORTUGUESE: Labels = Labels {
    title: "GAME OF SKATE",
    name_placeholder: "Nome do skatista",
    add: "OK",
    shuffle: "Sortear Ordem",
    shuffling: "Sorteando...",
    eliminated: "Eliminado!",
    delete: "Deletar jogador",
    winner: "Campeão",
};

const ENGLISH: Labels = Labels {
    title: "GAME OF SKATE",
    name_placeholder: "Skater name",
    add: "OK",
    shuffle: "Shuffle Order",
    shuffling: "Shuffling...",
    eliminated: "Out!",
    delete: "Delete player",
    winner: "Winner",
};

impl Labels {
    pub fn for_locale(locale: Locale) -> &'static Labels {
        match locale {
            Locale::Portuguese => &PORTUGUESE,
            Locale::English => &ENGLISH,
        }
    }
}

/// One letter button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterCell {
    pub letter: Letter,
    pub failed: bool,
}

impl LetterCell {
    /// The letter itself, or the failed marker
    pub fn text(&self) -> char {
        if self.failed {
            FAILED_MARK
        } else {
            self.letter.as_char()
        }
    }
}

/// One player card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRow {
    pub id: PlayerId,
    /// 1-based turn position
    pub position: usize,
    pub name: String,
    pub eliminated: bool,
    pub letters: [LetterCell; LETTER_COUNT],
}

impl PlayerRow {
    pub fn position_label(&self) -> String {
        format!("#{}", self.position)
    }
}

/// Rows in turn order
pub fn roster_rows(players: &[Player]) -> Vec<PlayerRow> {
    players
        .iter()
        .enumerate()
        .map(|(i, player)| PlayerRow {
            id: player.id,
            position: i + 1,
            name: player.name.clone(),
            eliminated: player.is_eliminated(),
            letters: player.letters.map(|slot| LetterCell {
                letter: slot.letter,
                failed: slot.failed,
            }),
        })
        .collect()
}

/// State of the shuffle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleButton {
    pub label: &'static str,
    pub enabled: bool,
    /// Spinner icon and dimmed cards while a sequence runs
    pub spinning: bool,
}

pub fn shuffle_button(labels: &Labels, phase: ShufflePhase, roster_len: usize) -> ShuffleButton {
    let spinning = phase == ShufflePhase::Shuffling;
    ShuffleButton {
        label: if spinning {
            labels.shuffling
        } else {
            labels.shuffle
        },
        enabled: !spinning && roster_len >= MIN_SHUFFLE_PLAYERS,
        spinning,
    }
}

/// Banner for the last skater standing
pub fn winner_banner(labels: &Labels, standing: Option<&Player>) -> Option<String> {
    standing.map(|player| format!("{}: {}", labels.winner, player.name))
}

/// Plain-text rendering of the roster, one player per line
pub fn render_text(players: &[Player], labels: &Labels) -> String {
    let mut out = String::new();
    for row in roster_rows(players) {
        let letters = row
            .letters
            .iter()
            .map(|cell| cell.text().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        out.push_str(&format!("{:>3} {:<20} {}", row.position_label(), row.name, letters));
        if row.eliminated {
            out.push_str(&format!("  {}", labels.eliminated));
        }
        out.push('\n');
    }
    out
}
