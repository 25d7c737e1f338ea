use super::document::Document;

const STYLE: &str = r#"
    body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; direction: rtl; text-align: right; margin: 2em; color: #222; }
    h1 { color: #0083B8; border-bottom: 2px solid #0083B8; padding-bottom: 0.3em; }
    .personal { display: grid; grid-template-columns: repeat(3, 1fr); gap: 0.6em 2em; margin-bottom: 1.5em; }
    .personal .label { color: #666; font-size: 0.9em; }
    .personal .value { font-weight: bold; font-size: 1.1em; }
    table { width: 100%; border-collapse: collapse; }
    th, td { border: 1px solid #999; padding: 0.4em 0.8em; }
    th { background: #0083B8; color: white; }
    tr:nth-child(even) td { background: #f3f7fa; }
    .total { margin-top: 1em; font-weight: bold; }
    footer { margin-top: 3em; font-size: 0.8em; color: #777; text-align: center; }
    @media print { body { margin: 0; } th { -webkit-print-color-adjust: exact; print-color-adjust: exact; } }
"#;

/// Render a report as a standalone right-to-left HTML page, ready to print.
/// No external stylesheets, fonts or images are referenced.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{} - {}</title>\n",
        escape(&doc.title),
        escape(&doc.trainee_id)
    ));
    out.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));

    out.push_str(&format!("<h1>{}</h1>\n", escape(&doc.title)));

    out.push_str("<section class=\"personal\">\n");
    for field in &doc.personal {
        out.push_str(&format!(
            "  <div><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            escape(&field.label),
            escape(&field.value)
        ));
    }
    out.push_str("</section>\n");

    out.push_str("<table>\n  <thead>\n    <tr>");
    for header in &doc.courses.headers {
        out.push_str(&format!("<th>{}</th>", escape(header)));
    }
    out.push_str("</tr>\n  </thead>\n  <tbody>\n");
    for row in &doc.courses.rows {
        out.push_str("    <tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("  </tbody>\n</table>\n");

    out.push_str(&format!(
        "<p class=\"total\">{}: {}</p>\n",
        escape(&doc.total_units_label),
        doc.total_units_text()
    ));
    out.push_str(&format!("<footer>{}</footer>\n", escape(&doc.footer)));
    out.push_str("</body>\n</html>\n");

    out
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{course_row, dataset, two_trainees};
    use crate::data::grouping::group;
    use crate::report::document::{FOOTER, TITLE, render};

    #[test]
    fn test_html_contains_all_blocks() {
        let doc = render(&group(&two_trainees(), "445210").unwrap());
        let html = to_html(&doc);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains(&format!("<h1>{TITLE}</h1>")));
        assert!(html.contains("<th>رمز المقرر</th><th>اسم المقرر</th><th>الوحدات المعتمدة</th>"));
        assert!(html.contains(": 8</p>"));
        assert!(html.contains(&format!("<footer>{FOOTER}</footer>")));
        assert_eq!(html.matches("<tr>").count(), 4);
    }

    #[test]
    fn test_html_rows_follow_course_order() {
        let html = to_html(&render(&group(&two_trainees(), "445210").unwrap()));
        let first = html.find("CS101").unwrap();
        let second = html.find("CS102").unwrap();
        let third = html.find("MATH110").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_html_escapes_markup() {
        let ds = dataset(vec![course_row("1", "<script>alert('x')</script>", "C&D", 1.0)]);
        let html = to_html(&render(&group(&ds, "1").unwrap()));

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("<td>C&amp;D</td>"));
    }

    #[test]
    fn test_html_has_no_external_resources() {
        let html = to_html(&render(&group(&two_trainees(), "998111").unwrap()));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("src="));
    }
}
