//! Charts module - bar chart spec and its two rendering backends

pub mod palette;
mod plotter;
mod renderer;
mod spec;

pub use plotter::InteractiveBarChart;
pub use renderer::StaticBarChart;
pub use spec::BarChartSpec;

/// Format a population with thousands separators, e.g. `39,512,223`.
pub fn format_population(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
