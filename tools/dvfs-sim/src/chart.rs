use dslab_dvfs::trace::EnergySample;

pub const CHART_WIDTH: usize = 50;

/// Renders the cumulative energy series as a table followed by a horizontal bar chart.
///
/// Returns an empty string for an empty series.
pub fn render_chart(series: &[EnergySample], width: usize) -> String {
    if series.is_empty() {
        return String::new();
    }
    let max_energy = series.iter().map(|s| s.energy).fold(0., f64::max);

    let mut out = String::new();
    out.push_str("Energy Consumption Over Time:\n");
    out.push_str("Time (s)\tEnergy (J)\n");
    out.push_str("----------------------------\n");
    for sample in series {
        out.push_str(&format!("{:.2}\t\t{:.6}\n", sample.time, sample.energy));
    }

    out.push_str("\nSimple ASCII Chart:\n");
    for sample in series {
        let bar_length = if max_energy > 0. {
            (sample.energy / max_energy * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:.2}s |{} {:.6} J\n",
            sample.time,
            "#".repeat(bar_length),
            sample.energy
        ));
    }
    out
}
