//! User-facing text rendering for search results and session status.
//!
//! Rendering is kept separate from log output: these strings go to stdout
//! for the user, tracing goes to stderr for diagnostics.

use imgfetch_core::{ImageHit, SearchSession};

/// Help text for the interactive session.
pub const INTERACTIVE_HELP: &str = "Commands:
  <query>      search images
  m            load more results
  d <number>   download the numbered image
  h            show this help
  q            quit";

/// Renders one numbered result row with its thumbnail URL.
pub fn render_result_row(index: usize, hit: &ImageHit) -> String {
    let description = match hit.description() {
        "" => "(no description)",
        text => text,
    };
    format!("{index:>3}. [{}] {description}\n     {}", hit.id, hit.urls.small)
}

/// Renders the rows `range_start..` of the session's result list.
///
/// After a load-more only the newly appended rows are rendered; indices
/// stay global so download commands keep working across pages.
pub fn render_rows_from(session: &SearchSession, range_start: usize) -> String {
    session
        .results()
        .iter()
        .enumerate()
        .skip(range_start)
        .map(|(i, hit)| render_result_row(i + 1, hit))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the one-line status summary shown after a fetch.
pub fn render_summary(session: &SearchSession) -> String {
    let count = session.results().len();
    let noun = if count == 1 { "result" } else { "results" };
    let mut line = format!(
        "{count} {noun} for \"{}\" (through page {})",
        session.query(),
        session.page()
    );
    if session.has_more() {
        line.push_str("; `m` loads more");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgfetch_core::{ImageHit, ImageUrls};

    fn hit(id: &str, description: Option<&str>) -> ImageHit {
        ImageHit {
            id: id.to_string(),
            urls: ImageUrls {
                small: format!("https://img.example.com/{id}-small"),
                full: format!("https://img.example.com/{id}-full"),
            },
            alt_description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_render_result_row() {
        let rendered = render_result_row(3, &hit("abc", Some("a cat")));
        assert!(rendered.contains("  3. [abc] a cat"), "got: {rendered}");
        assert!(
            rendered.contains("https://img.example.com/abc-small"),
            "got: {rendered}"
        );
    }

    #[test]
    fn test_render_result_row_without_description() {
        let rendered = render_result_row(1, &hit("abc", None));
        assert!(rendered.contains("(no description)"), "got: {rendered}");
    }

    #[test]
    fn test_render_rows_from_skips_already_printed() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, vec![hit("a", None), hit("b", None)]);
        let ticket = session.begin_load_more().unwrap();
        session.apply_success(&ticket, vec![hit("c", None)]);

        let rendered = render_rows_from(&session, 2);
        assert!(rendered.contains("[c]"), "got: {rendered}");
        assert!(!rendered.contains("[a]"), "got: {rendered}");
        assert!(rendered.contains("  3. "), "indices stay global: {rendered}");
    }

    #[test]
    fn test_render_summary_with_more() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, vec![hit("a", None)]);

        let summary = render_summary(&session);
        assert!(
            summary.contains("1 result for \"cats\" (through page 1)"),
            "got: {summary}"
        );
        assert!(summary.contains("`m` loads more"), "got: {summary}");
    }

    #[test]
    fn test_render_summary_exhausted() {
        let mut session = SearchSession::new();
        let ticket = session.begin_search("cats").unwrap();
        session.apply_success(&ticket, vec![hit("a", None), hit("b", None)]);
        let ticket = session.begin_load_more().unwrap();
        session.apply_success(&ticket, Vec::new());

        let summary = render_summary(&session);
        assert!(summary.contains("2 results"), "got: {summary}");
        assert!(!summary.contains("loads more"), "got: {summary}");
    }
}
