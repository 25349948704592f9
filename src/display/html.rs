use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use crate::data::interop::NULL_TEXT;
use crate::error::Result;

// ---------------------------------------------------------------------------
// HTML helpers for the rich rendering
// ---------------------------------------------------------------------------

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

/// One labelled block of the side-by-side layout.
pub fn labelled_block(label: &str, content: &str) -> String {
    format!(
        "<div style=\"float: left; padding: 10px;\">\n    \
         <p style='font-family:\"Courier New\", Courier, monospace'>{}</p>{content}\n    \
         </div>",
        escape(label)
    )
}

/// Plain text shown preformatted, for objects without a rich form.
pub fn preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", escape(text))
}

/// Render a record batch as an HTML table.
pub fn record_batch_to_html(batch: &RecordBatch) -> Result<String> {
    let options = FormatOptions::default().with_null(NULL_TEXT);
    let formatters = batch
        .columns()
        .iter()
        .map(|col| ArrayFormatter::try_new(col.as_ref(), &options))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut html = String::from("<table border=\"1\" class=\"dataframe\">\n  <thead>\n    <tr>");
    for field in batch.schema().fields() {
        html.push_str(&format!("<th>{}</th>", escape(field.name())));
    }
    html.push_str("</tr>\n  </thead>\n  <tbody>\n");

    for row in 0..batch.num_rows() {
        html.push_str("    <tr>");
        for formatter in &formatters {
            let cell = formatter.value(row).to_string();
            html.push_str(&format!("<td>{}</td>", escape(&cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use arrow::array::{ArrayRef, Int64Array, StringArray};

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<a href='x'>&\"</a>"),
            "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;"
        );
    }

    #[test]
    fn block_wraps_label_and_content() {
        let block = labelled_block("df<1>", "<b>x</b>");
        assert!(block.starts_with("<div style=\"float: left; padding: 10px;\">"));
        assert!(block.contains("monospace'>df&lt;1&gt;</p><b>x</b>"));
        assert!(block.ends_with("</div>"));
    }

    #[test]
    fn batch_becomes_table_rows() {
        let batch = RecordBatch::try_from_iter(vec![
            ("n", Arc::new(Int64Array::from(vec![Some(1), None])) as ArrayRef),
            ("s", Arc::new(StringArray::from(vec!["a<b", "c"])) as ArrayRef),
        ])
        .unwrap();
        let html = record_batch_to_html(&batch).unwrap();
        assert!(html.contains("<th>n</th><th>s</th>"));
        assert!(html.contains("<tr><td>1</td><td>a&lt;b</td></tr>"));
        assert!(html.contains("<tr><td>null</td><td>c</td></tr>"));
    }
}
