use std::fmt::Write;

use dashboard_core::{DashboardView, Phase};

/// Plain-text rendering of the dashboard for the terminal.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Smart Weather Dashboard  ·  {}  ·  {}", view.today, view.units);

    match view.phase {
        Phase::Idle => {
            let _ = writeln!(out, "\nSearch for a city to see its weather.");
        }
        Phase::Loading => {
            let _ = writeln!(out, "\nLoading...");
        }
        Phase::Error => {
            if let Some(error) = &view.error {
                let _ = writeln!(out, "\nError: {error}");
            }
        }
        Phase::Success => {}
    }

    if let Some(current) = &view.current {
        let _ = writeln!(out);
        if view.stale {
            let _ = writeln!(out, "(previous result)");
        }
        let _ = writeln!(out, "{}", current.location);
        let _ = writeln!(
            out,
            "  {}  {}  (feels like {})",
            current.temperature, current.description, current.feels_like
        );
        let _ = writeln!(
            out,
            "  Humidity {}  ·  Wind {}  ·  Pressure {}",
            current.humidity, current.wind, current.pressure
        );
    }

    if let Some(advice) = &view.advice {
        let _ = writeln!(out, "\n  {advice}");
    }

    if !view.forecast.is_empty() {
        let _ = writeln!(out, "\nForecast");
        for card in &view.forecast {
            let _ = writeln!(out, "  {:<4}{:>6}  {}", card.day, card.temperature, card.description);
        }
    }

    if !view.recent.is_empty() {
        let _ = writeln!(out, "\n{}", render_recent(&view.recent));
    }

    out
}

/// "Recent: [1] Paris  [2] Tokyo"
pub fn render_recent(recent: &[String]) -> String {
    if recent.is_empty() {
        return "No recent searches.".to_string();
    }

    let items: Vec<String> = recent
        .iter()
        .enumerate()
        .map(|(i, name)| format!("[{}] {}", i + 1, name))
        .collect();

    format!("Recent: {}", items.join("  "))
}
