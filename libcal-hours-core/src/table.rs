//! HTML table rendering for a window of display days.
//!
//! The first week is visible; every following week sits in its own
//! `<tbody class="hidden">` so client-side script can page through them
//! with the footer links.

use crate::i18n::{Localize, TextKey};
use crate::window::DisplayDay;

/// Rows per visible block.
pub const DAYS_PER_BLOCK: usize = 7;

/// Render `days` as a self-contained `<table>` fragment.
pub fn render_table<L: Localize + ?Sized>(days: &[DisplayDay], num_weeks: u32, labels: &L) -> String {
    let mut out = String::from(r#"<table class="wplibcalhours">"#);

    out.push_str(&format!(
        r#"<thead><tr><th colspan="3">{}</th></tr></thead>"#,
        html_escape(&labels.text(TextKey::Hours))
    ));

    out.push_str("<tbody>");
    for (i, day) in days.iter().enumerate() {
        if i > 0 && i % DAYS_PER_BLOCK == 0 {
            out.push_str(r#"</tbody><tbody class="hidden">"#);
        }
        out.push_str(&render_row(day));
    }
    out.push_str("</tbody>");

    if num_weeks > 1 {
        out.push_str(&render_footer(labels));
    }

    out.push_str("</table>");
    out
}

fn render_row(day: &DisplayDay) -> String {
    let open_tag = if day.is_today { r#"<tr class="today">"# } else { "<tr>" };
    format!(
        "{open_tag}<td>{weekday}</td><td>{date}</td><td>{text}</td></tr>",
        weekday = day.weekday_name(),
        date = day.short_date(),
        text = html_escape(&day.text),
    )
}

fn render_footer<L: Localize + ?Sized>(labels: &L) -> String {
    format!(
        r#"<tfoot><tr><td colspan="3"><a class="prev hidden">&laquo; {previous}</a><a class="next">{next} &raquo;</a></td></tr></tfoot>"#,
        previous = html_escape(&labels.text(TextKey::Previous)),
        next = html_escape(&labels.text(TextKey::Next)),
    )
}

fn html_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use chrono::{Days, NaiveDate};

    fn make_days(n: usize) -> Vec<DisplayDay> {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        (0..n)
            .map(|i| DisplayDay {
                date: today + Days::new(i as u64),
                text: "9am - 5pm".to_string(),
                is_today: i == 0,
            })
            .collect()
    }

    /// Row index at which each `<tbody>` starts.
    fn block_starts(html: &str) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut row = 0;
        let mut rest = html;
        while let Some(pos) = rest.find('<') {
            rest = &rest[pos..];
            if rest.starts_with("<tbody") {
                starts.push(row);
            } else if rest.starts_with("<tr") && !rest.starts_with("<tr><th") {
                row += 1;
            }
            rest = &rest[1..];
        }
        starts
    }

    #[test]
    fn test_render_single_week_exact_markup() {
        let days = make_days(2);
        let html = render_table(&days, 1, &Catalog::default());

        assert_eq!(
            html,
            concat!(
                r#"<table class="wplibcalhours">"#,
                r#"<thead><tr><th colspan="3">Hours</th></tr></thead>"#,
                r#"<tbody>"#,
                r#"<tr class="today"><td>Monday</td><td>Oct 19</td><td>9am - 5pm</td></tr>"#,
                r#"<tr><td>Tuesday</td><td>Oct 20</td><td>9am - 5pm</td></tr>"#,
                r#"</tbody>"#,
                r#"</table>"#,
            )
        );
    }

    #[test]
    fn test_render_three_weeks_block_boundaries() {
        let html = render_table(&make_days(21), 3, &Catalog::default());

        assert_eq!(block_starts(&html), vec![0, 7, 14]);
        assert_eq!(html.matches(r#"<tbody class="hidden">"#).count(), 2);
        assert!(html.contains(r#"<tbody><tr class="today">"#));
    }

    #[test]
    fn test_footer_only_for_multiple_weeks() {
        let one = render_table(&make_days(7), 1, &Catalog::default());
        assert!(!one.contains("<tfoot>"));

        let two = render_table(&make_days(14), 2, &Catalog::default());
        assert!(two.contains(
            r#"<tfoot><tr><td colspan="3"><a class="prev hidden">&laquo; previous</a><a class="next">next &raquo;</a></td></tr></tfoot></table>"#
        ));
    }

    #[test]
    fn test_render_escapes_text() {
        let mut days = make_days(1);
        days[0].text = "<b>9am</b> & later".to_string();
        let labels = Catalog::default().with(TextKey::Hours, "Hours \"today\"");

        let html = render_table(&days, 1, &labels);
        assert!(html.contains("<td>&lt;b&gt;9am&lt;/b&gt; &amp; later</td>"));
        assert!(html.contains("Hours &quot;today&quot;"));
    }

    #[test]
    fn test_render_empty_days() {
        let html = render_table(&[], 1, &Catalog::default());
        assert!(html.contains("<tbody></tbody>"));
    }
}
