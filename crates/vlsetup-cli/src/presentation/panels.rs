//! Boxed text panels.

/// Draw `lines` inside a rounded box with `title` in the top border.
///
/// Width follows the longest line (counted in chars). No color is applied.
pub fn render_panel(title: &str, lines: &[String]) -> Vec<String> {
    let title_width = title.chars().count() + 2;
    let inner = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title_width + 1);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!(
        "╭─ {title} {}╮",
        "─".repeat(inner + 1 - title_width)
    ));
    for line in lines {
        let pad = inner - line.chars().count();
        out.push(format!("│ {line}{} │", " ".repeat(pad)));
    }
    out.push(format!("╰{}╯", "─".repeat(inner + 2)));
    out
}
