//! Plain-text and JSON rendering for command output.

use std::fmt::Write;

use fairplay::{
    DisplayStanding, PairingHistory, PlayerId, PlayerUniverse, Schedule, SearchOutcome, Standing,
    ViolationReport,
};
use owo_colors::OwoColorize;
use serde_json::{json, Value};

fn title(text: &str) -> String {
    text.bold().to_string()
}

fn join(ids: &[PlayerId]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn schedule_summary(schedule: &Schedule, universe: &PlayerUniverse) -> String {
    let courts: usize = schedule.rounds().iter().map(|r| r.courts.len()).sum();
    let mut out = String::new();
    let _ = writeln!(out, "{}", title("Schedule OK"));
    let _ = writeln!(out, "  players:  {}", universe.len());
    let _ = writeln!(out, "  rounds:   {}", schedule.round_count());
    let _ = writeln!(out, "  matches:  {courts}");
    let _ = writeln!(out, "  iron:     {}", join(schedule.iron_players()));
    if let Some(kind) = &schedule.metadata.tournament_type {
        let _ = writeln!(out, "  type:     {kind}");
    }
    out
}

pub fn pair_report(history: &PairingHistory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title("Pairing history"));
    let _ = writeln!(out, "  rounds recorded:   {}", history.rounds_recorded());
    let _ = writeln!(out, "  partner meetings:  {}", history.total_partner_meetings());
    let _ = writeln!(out, "  opponent meetings: {}", history.total_opponent_meetings());
    let _ = writeln!(out, "  max partner count: {}", history.max_partner_count());
    let _ = writeln!(out, "  max opponent count: {}", history.max_opponent_count());

    for (label, pairs) in [
        ("Repeated partners", history.repeated_partners()),
        ("Repeated opponents", history.repeated_opponents()),
    ] {
        let _ = writeln!(out, "\n{} ({})", title(label), pairs.len());
        for (pair, count) in pairs {
            let _ = writeln!(out, "  {pair}: {count}x");
        }
    }
    out
}

pub fn pair_report_json(history: &PairingHistory) -> Value {
    let pairs = |list: Vec<(fairplay::PlayerPair, u32)>| -> Value {
        list.into_iter()
            .map(|(pair, count)| json!({ "players": [pair.low(), pair.high()], "count": count }))
            .collect()
    };
    json!({
        "roundsRecorded": history.rounds_recorded(),
        "totalPartnerMeetings": history.total_partner_meetings(),
        "totalOpponentMeetings": history.total_opponent_meetings(),
        "repeatedPartners": pairs(history.repeated_partners()),
        "repeatedOpponents": pairs(history.repeated_opponents()),
    })
}

pub fn violation_report(report: &ViolationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Top tier:    {}", join(&report.top_tier));
    let _ = writeln!(out, "Bottom tier: {}", join(&report.bottom_tier));
    let _ = writeln!(out, "Middle tier: {}", join(&report.middle_tier));
    let _ = writeln!(out, "\nViolations: {}", report.violation_count);
    for line in report.violation_details() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(out, "Good matchups: {}", report.good_matchup_count);
    for line in report.good_matchup_details() {
        let _ = writeln!(out, "  {line}");
    }
    out
}

pub fn search_summary(outcome: &SearchOutcome) -> String {
    let best = &outcome.best;
    let stats = &outcome.statistics;
    let mut out = String::new();
    let _ = writeln!(out, "{}", title("Best tier split"));
    let _ = writeln!(
        out,
        "  found at: top {} / bottom {}, trial {}",
        best.found_at.top_size, best.found_at.bottom_size, best.found_at.trial
    );
    match outcome.seed {
        Some(seed) => {
            let _ = writeln!(out, "  seed:     {seed}");
        }
        None => {
            let _ = writeln!(out, "  seed:     caller rng");
        }
    }
    let _ = writeln!(
        out,
        "  trials:   {}/{}{}",
        stats.trials_run,
        stats.total_trials,
        if stats.terminated_early {
            " (stopped early)"
        } else {
            ""
        }
    );
    out.push('\n');
    out.push_str(&violation_report(&best.report));
    out
}

pub fn search_json(outcome: &SearchOutcome) -> Value {
    let best = &outcome.best;
    let stats = &outcome.statistics;
    json!({
        "seed": outcome.seed,
        "foundAt": {
            "topSize": best.found_at.top_size,
            "bottomSize": best.found_at.bottom_size,
            "trial": best.found_at.trial,
        },
        "trialsRun": stats.trials_run,
        "totalTrials": stats.total_trials,
        "terminatedEarly": stats.terminated_early,
        "report": best.report,
    })
}

pub fn standings_table(rows: &[Standing]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        title(&format!(
            "{:>4} {:>6} {:>3} {:>3} {:>3} {:>5} {:>5} {:>5} {:>4}",
            "Rank", "Player", "M", "W", "L", "PF", "PA", "Diff", "Byes"
        ))
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>4} {:>6} {:>3} {:>3} {:>3} {:>5} {:>5} {:>+5} {:>4}{}",
            row.rank,
            row.player.to_string(),
            row.matches,
            row.wins,
            row.losses,
            row.points_for,
            row.points_against,
            row.diff,
            row.byes,
            if row.iron { "  iron" } else { "" }
        );
    }
    out
}

pub fn display_standings_table(rows: &[DisplayStanding]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        title(&format!(
            "{:>4} {:>6} {:>3} {:>5} {:>5} {:>7} {:>7} {:>7}",
            "Rank", "Player", "M", "W", "L", "PF", "PA", "Diff"
        ))
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:>4} {:>6} {:>3} {:>5.1} {:>5.1} {:>7.1} {:>7.1} {:>+7.1}{}",
            row.rank,
            row.player.to_string(),
            row.matches,
            row.wins,
            row.losses,
            row.points_for,
            row.points_against,
            row.diff,
            if row.iron { "  iron" } else { "" }
        );
    }
    out
}
