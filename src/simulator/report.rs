//! Simulation report generation.

use serde::Serialize;

/// How a single simulated encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    Landed,
    Snapped,
    /// Still running when the tick budget ran out.
    TimedOut,
}

/// Statistics from a single encounter.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub outcome: RunOutcome,
    pub ticks: u64,
    /// Ticks spent with progress pinned at zero.
    pub stressed_ticks: u64,
    pub fish_weight: f64,
}

/// Aggregated results across all runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub rod_name: String,
    pub input_profile: String,
    pub policy: String,
    pub landed: u32,
    pub snapped: u32,
    pub timed_out: u32,
    /// Landed share of all runs, 0.0-1.0.
    pub win_rate: f64,
    pub avg_ticks_to_land: f64,
    pub avg_stressed_ticks: f64,
    pub avg_fish_weight: f64,
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

impl SimReport {
    /// Aggregates per-run statistics.
    pub fn from_runs(
        runs: Vec<RunStats>,
        rod_name: &str,
        input_profile: &str,
        policy: &str,
    ) -> Self {
        let num_runs = runs.len() as u32;
        let count = |outcome: RunOutcome| {
            runs.iter().filter(|r| r.outcome == outcome).count() as u32
        };
        let landed = count(RunOutcome::Landed);
        let snapped = count(RunOutcome::Snapped);
        let timed_out = count(RunOutcome::TimedOut);

        let win_rate = if num_runs > 0 {
            landed as f64 / num_runs as f64
        } else {
            0.0
        };

        let avg_ticks_to_land = mean(
            runs.iter()
                .filter(|r| r.outcome == RunOutcome::Landed)
                .map(|r| r.ticks as f64),
        );
        let avg_stressed_ticks = mean(runs.iter().map(|r| r.stressed_ticks as f64));
        let avg_fish_weight = mean(runs.iter().map(|r| r.fish_weight));

        Self {
            num_runs,
            rod_name: rod_name.to_string(),
            input_profile: input_profile.to_string(),
            policy: policy.to_string(),
            landed,
            snapped,
            timed_out,
            win_rate,
            avg_ticks_to_land,
            avg_stressed_ticks,
            avg_fish_weight,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  REELING SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} total | Rod: {} | Input: {} | Bot: {}\n\n",
            self.num_runs, self.rod_name, self.input_profile, self.policy
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Landed:              {}\n", self.landed));
        report.push_str(&format!("  Line Snapped:        {}\n", self.snapped));
        report.push_str(&format!("  Timed Out:           {}\n", self.timed_out));
        report.push_str(&format!(
            "  Win Rate:            {:.1}%\n\n",
            self.win_rate * 100.0
        ));

        report.push_str("── PACING ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg Ticks to Land:   {:.0} ({:.1}s at 60fps)\n",
            self.avg_ticks_to_land,
            self.avg_ticks_to_land / 60.0
        ));
        report.push_str(&format!(
            "  Avg Stressed Ticks:  {:.1}\n",
            self.avg_stressed_ticks
        ));
        report.push_str(&format!(
            "  Avg Fish Weight:     {:.1}\n\n",
            self.avg_fish_weight
        ));

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.win_rate > 0.95 {
            "TOO EASY - Fish almost never escape"
        } else if self.win_rate > 0.6 {
            "GOOD - Challenging but fair"
        } else if self.win_rate > 0.3 {
            "HARD - Most fish get away"
        } else {
            "TOO HARD - Line snaps constantly"
        };
        report.push_str(&format!("  Difficulty: {}\n", rating));

        if self.timed_out > 0 {
            report.push_str("  ⚠️  Some encounters never resolved - stalemate tuning?\n");
        }
        if self.avg_ticks_to_land > 0.0 && self.avg_ticks_to_land < 170.0 {
            report.push_str("  ⚠️  Fights end in under 3s - progress gain too high?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
