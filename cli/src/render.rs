use fightsim::{BoutEvent, BudgetEvent, BudgetResult, BudgetVerdict, TournamentResult};

fn minutes(seconds: f64) -> String {
    let total = seconds.round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn print_elimination(events: &[BoutEvent], result: &TournamentResult) {
    for e in events {
        println!("--- Round {} ---", e.round);
        println!("{} vs. {}", e.fighter_a, e.fighter_b);
        println!("Fatigue before: {:.0}s | {:.0}s", e.fatigue_a, e.fatigue_b);
        println!(
            "Winner: {} by {} in {:.1} seconds ({} eliminated)",
            e.winner,
            e.method_label(),
            e.duration,
            e.loser
        );
        println!();
    }

    println!("Bouts:          {}", result.bouts);
    println!(
        "Fight time:     {:.1}s ({})",
        result.total_bout_duration,
        minutes(result.total_bout_duration)
    );
    println!(
        "Break time:     {:.0}s ({})",
        result.total_break_duration,
        minutes(result.total_break_duration)
    );
    println!("Total:          {}", minutes(result.total_duration()));
    println!("Team {} wins - the other roster is empty.", result.winning_team);
}

pub fn print_budget(events: &[BudgetEvent], result: &BudgetResult) {
    for e in events {
        println!("--- Round {} ---", e.round);
        println!("{} vs. {}", e.fighter_a, e.fighter_b);
        match &e.winner {
            Some(winner) => println!(
                "Winner: {} by {} in {:.1} seconds",
                winner,
                e.method_label(),
                e.duration
            ),
            None => println!("No winner: {} after {:.1} seconds", e.method_label(), e.duration),
        }
        println!("Time left {}: {:.0}s", e.fighter_a, e.time_left_a);
        println!("Time left {}: {:.0}s", e.fighter_b, e.time_left_b);
        println!(
            "Team time {}: {:.0}s | {}: {:.0}s",
            result.team_a, e.team_time_a, result.team_b, e.team_time_b
        );
        println!();
    }

    match result.verdict {
        BudgetVerdict::BothExhausted => {
            println!("Draw - both teams have used up their time.")
        }
        BudgetVerdict::TeamATimeExhausted => println!(
            "Team {} wins - team {} has no time left.",
            result.team_b, result.team_a
        ),
        BudgetVerdict::TeamBTimeExhausted => println!(
            "Team {} wins - team {} has no time left.",
            result.team_a, result.team_b
        ),
        BudgetVerdict::PrematureHalt => println!(
            "Halted: no eligible fighters left although both teams still have time ({:.0}s | {:.0}s).",
            result.time_left_a, result.time_left_b
        ),
    }
}
