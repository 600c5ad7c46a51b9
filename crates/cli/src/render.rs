//! Plain-text stand-ins for the dashboard's charts, tables and word clouds.

use supplier_risk_core::keywords::KeywordView;

const BAR_WIDTH: usize = 40;

/// Horizontal bar chart scaled to the largest value.
pub fn bar_chart(title: &str, rows: &[(String, f64)]) -> String {
    let mut out = format!("{title}\n");
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    for (label, value) in rows {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "  {label:<label_width$} | {} {value}\n",
            "█".repeat(len)
        ));
    }
    out
}

pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<width$}", width = *w))
            .collect();
        format!("  {}\n", padded.join(" | ").trim_end())
    };
    let mut out = line(headers.to_vec());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("  {}\n", rule.join("-+-")));
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

pub fn bullets<'a>(items: impl IntoIterator<Item = &'a str>) -> String {
    items
        .into_iter()
        .map(|item| format!("  - {item}\n"))
        .collect()
}

/// Ranked keyword list; bar length tracks each token's relative weight.
pub fn keyword_cloud(view: &KeywordView, top: usize) -> String {
    if view.is_empty() {
        return "  (no keywords found)\n".to_string();
    }
    let entries = view.top(top);
    let width = entries.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (token, weight) in entries {
        let rel = view.relative_weight(token).unwrap_or(0.0);
        let len = ((rel * BAR_WIDTH as f32).round() as usize).max(1);
        out.push_str(&format!(
            "  {token:<width$} {} {weight}\n",
            "▇".repeat(len)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use supplier_risk_core::config::KeywordConfig;
    use supplier_risk_core::keywords::KeywordSummarizer;

    #[test]
    fn largest_value_gets_full_bar() {
        let chart = bar_chart(
            "Delays",
            &[("GE".to_string(), 4.0), ("Bosch".to_string(), 2.0)],
        );
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Delays");
        assert_eq!(lines[1].matches('█').count(), BAR_WIDTH);
        assert_eq!(lines[2].matches('█').count(), BAR_WIDTH / 2);
        assert!(lines[1].ends_with(" 4"));
    }

    #[test]
    fn table_aligns_columns() {
        let out = table(
            &["Name", "Size"],
            &[
                vec!["Shweta".into(), "Large".into()],
                vec!["GTS".into(), "Small".into()],
            ],
        );
        assert_eq!(
            out,
            "  Name   | Size\n  -------+------\n  Shweta | Large\n  GTS    | Small\n"
        );
    }

    #[test]
    fn keyword_cloud_lists_heaviest_first() {
        let view = KeywordSummarizer::new(KeywordConfig::default())
            .summarize("delay delay shipment vendor vendor vendor");
        let out = keyword_cloud(&view, 10);
        let tokens: Vec<&str> = out
            .lines()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(tokens, vec!["vendor", "delay", "shipment"]);
    }

    #[test]
    fn empty_view_renders_placeholder() {
        assert_eq!(
            keyword_cloud(&KeywordView::default(), 5),
            "  (no keywords found)\n"
        );
    }
}
