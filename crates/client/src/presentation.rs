//! Plain-text rendering of round reports.

use combat_core::{CharacterId, CharacterSnapshot, Move, TrackedMove};
use combat_runtime::RoundReport;

const BAR_WIDTH: usize = 10;

/// Renders one round as a block of lines.
pub fn render_round(report: &RoundReport) -> String {
    let mut out = format!("== round {} ==\n", report.round);

    for tracked in &report.resolved {
        out.push_str(&format!(
            "  resolved {}\n",
            describe(tracked, &report.characters)
        ));
    }
    for snapshot in &report.characters {
        out.push_str("  ");
        out.push_str(&render_character(snapshot));
        out.push('\n');
    }
    if report.outcome.is_finished() {
        out.push_str(&format!("  outcome: {}\n", report.outcome));
    }

    out
}

/// One status line for a character.
pub fn render_character(snapshot: &CharacterSnapshot) -> String {
    if !snapshot.alive {
        return format!("{:<10} offline", snapshot.name);
    }

    let mut line = format!(
        "{:<10} HP [{}] {:>3}/{:<3} CPU [{}] {}/{}",
        snapshot.name,
        bar(snapshot.health, snapshot.max_health),
        snapshot.health,
        snapshot.max_health,
        bar(snapshot.cpu_available, snapshot.max_cpu),
        snapshot.cpu_available,
        snapshot.max_cpu,
    );
    if snapshot.shield > 0 {
        line.push_str(&format!(" shield {}", snapshot.shield));
    }
    if !snapshot.effects.is_empty() {
        line.push_str(&format!(" ({})", snapshot.effects.join(", ")));
    }
    line
}

/// Numbered menu of the moves a player may submit.
pub fn render_menu(offered: &[Move], characters: &[CharacterSnapshot]) -> String {
    let mut out = String::from("  0) wait\n");
    for (index, mv) in offered.iter().enumerate() {
        out.push_str(&format!(
            "  {}) {} -> {}\n",
            index + 1,
            mv.description(),
            name_of(mv.target, characters)
        ));
    }
    out
}

fn describe(tracked: &TrackedMove, characters: &[CharacterSnapshot]) -> String {
    let mv = &tracked.mv;
    format!(
        "{} {}: {} -> {}",
        tracked.id,
        name_of(mv.user, characters),
        mv.description(),
        name_of(mv.target, characters)
    )
}

fn name_of(id: CharacterId, characters: &[CharacterSnapshot]) -> String {
    characters
        .iter()
        .find(|snapshot| snapshot.id == id)
        .map(|snapshot| snapshot.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn bar(value: i32, max: i32) -> String {
    let filled = if max <= 0 {
        0
    } else {
        (value.clamp(0, max) as usize * BAR_WIDTH).div_ceil(max as usize)
    };
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
