//! Startup banner for chat mode.
//!
//! Block-letter logo with a cycling color gradient, a few usage tips, and
//! a status line naming the model and endpoint. `colored` honors the
//! NO_COLOR convention, so plain terminals get plain text.

use colored::{Color, Colorize};

const LOGO_TEXT: &str = "NL2SPARQL";
const LOGO_HEIGHT: usize = 5;

const GRADIENT: [Color; 6] = [
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::BrightBlue,
    Color::BrightMagenta,
    Color::BrightCyan,
];

fn letter_art(ch: char) -> [&'static str; LOGO_HEIGHT] {
    match ch.to_ascii_uppercase() {
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        '2' => ["#####", "    #", "#####", "#    ", "#####"],
        'S' => ["#####", "#    ", "#####", "    #", "#####"],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'Q' => [" ### ", "#   #", "#   #", "#  ##", " ####"],
        _ => ["     ", "     ", "     ", "     ", "     "],
    }
}

fn render_logo(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); LOGO_HEIGHT];
    for ch in text.chars() {
        let art = letter_art(ch);
        for (idx, row) in rows.iter_mut().enumerate() {
            row.push_str(art[idx]);
            row.push_str("  ");
        }
    }
    rows.into_iter()
        .map(|row| row.trim_end().to_string())
        .collect()
}

/// Color every non-space character, cycling through the gradient.
fn gradient(line: &str) -> String {
    let mut rendered = String::new();
    let mut idx = 0;
    for ch in line.chars() {
        if ch == ' ' {
            rendered.push(ch);
            continue;
        }
        let color = GRADIENT[idx % GRADIENT.len()];
        rendered.push_str(&ch.to_string().color(color).to_string());
        idx += 1;
    }
    rendered
}

/// Host portion of an endpoint URL, for the status line.
fn endpoint_host(url: &str) -> &str {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let host = rest.split('/').next().unwrap_or(rest);
    if host.is_empty() { url } else { host }
}

/// Render the banner as a single printable block.
pub fn render(model: &str, endpoint_url: &str, timeout_secs: u64) -> String {
    let logo_lines = render_logo(LOGO_TEXT);
    let subtitle = "DBpedia SPARQL console online";
    let tips = [
        "Ask in natural language; mention entities by name.",
        "Add constraints (time, place, type) for precision.",
        "Type 'exit' or 'quit' to stop.",
    ];
    let status = format!(
        "Model: {} | Endpoint: {} | Timeout: {}s",
        model,
        endpoint_host(endpoint_url),
        timeout_secs
    );

    let width = logo_lines
        .iter()
        .map(|l| l.len())
        .chain([subtitle.len(), status.len(), "Tips for getting started:".len()])
        .max()
        .unwrap_or(0);
    let rule = "-".repeat(width).dimmed().to_string();

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    for line in &logo_lines {
        out.push_str(&gradient(line));
        out.push('\n');
    }
    out.push_str(&subtitle.cyan().bold().to_string());
    out.push_str("\n\n");
    out.push_str(&"Tips for getting started:".bold().to_string());
    out.push('\n');
    for (idx, tip) in tips.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", idx + 1, tip));
    }
    out.push('\n');
    out.push_str(&status.dimmed().to_string());
    out.push('\n');
    out.push_str(&rule);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logo_rows_have_equal_count() {
        let rows = render_logo("NL2SPARQL");
        assert_eq!(rows.len(), LOGO_HEIGHT);
        assert!(rows.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_endpoint_host_strips_scheme_and_path() {
        assert_eq!(endpoint_host("https://dbpedia.org/sparql"), "dbpedia.org");
        assert_eq!(endpoint_host("dbpedia.org/sparql"), "dbpedia.org");
        assert_eq!(endpoint_host("not a url"), "not a url");
    }

    #[test]
    fn test_render_mentions_model_and_host() {
        colored::control::set_override(false);
        let banner = render("openai/gpt-oss-120b", "https://dbpedia.org/sparql", 15);
        colored::control::unset_override();
        assert!(banner.contains("openai/gpt-oss-120b"));
        assert!(banner.contains("dbpedia.org"));
        assert!(banner.contains("Tips for getting started:"));
    }
}
