//! Index page markup. Element ids line up with the widget defaults in
//! `intake_widgets::PageConfig`.

use intake_widgets::{format_size_limit, AcceptancePolicy, PageConfig};

use crate::errors::AppError;

pub const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Purchase order intake</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>Purchase order intake</h1>
    <form id="uploadForm" action="{action}" method="post" enctype="multipart/form-data">
      <label for="customerSelect">Customer format</label>
      <select id="customerSelect" name="customer">
        <option value="">Select a customer</option>
{customer_options}      </select>
      <div id="dropArea" class="drop-area">
        <p>Drag and drop a file here, or</p>
        <input type="file" id="{input_id}" name="file" accept="{accept}">
        <p class="hint">Maximum size: {max_size}</p>
      </div>
      <div id="fileInfo" class="file-info" style="display:none">
        Selected: <span id="fileName"></span>
      </div>
      <label><input type="checkbox" name="save_to_db"> Save to database</label>
      <button type="submit" id="submitBtn" disabled>Process</button>
    </form>
    <div id="loading" class="loading" style="display:none">Processing, please wait&hellip;</div>
    <section id="results">
      <button type="button" id="copyBtn">Copy to clipboard</button>
      <table id="resultsTable"></table>
    </section>
  </main>
  <script type="module">
    import init, { start_index_page } from "/static/pkg/intake_widgets.js";
    await init();
    start_index_page({config_literal});
  </script>
</body>
</html>
"#;

/// Minimal HTML escaping for text and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_index(
    page: &PageConfig,
    customers: &[String],
    upload_action: &str,
) -> Result<String, AppError> {
    let options: String = customers
        .iter()
        .map(|c| {
            let c = escape_html(c);
            format!("        <option value=\"{c}\">{c}</option>\n")
        })
        .collect();
    let max_size = match page.policy {
        AcceptancePolicy::Pdf { max_bytes } => format_size_limit(max_bytes),
        _ => "-".to_string(),
    };
    // JSON string literal of the config JSON, so the script passes a string.
    let config_json = page.to_json()?;
    let config_literal = serde_json::to_string(&config_json)
        .map_err(|e| AppError::Internal(e.into()))?
        .replace("</", "<\\/");

    Ok(INDEX_TEMPLATE
        .replace("{action}", &escape_html(upload_action))
        .replace("{customer_options}", &options)
        .replace("{input_id}", &escape_html(&page.upload.input_id))
        .replace("{accept}", page.policy.accept_attribute())
        .replace("{max_size}", &max_size)
        .replace("{config_literal}", &config_literal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<Bob & "Sons">'"#),
            "&lt;Bob &amp; &quot;Sons&quot;&gt;&#39;"
        );
    }

    #[test]
    fn test_render_lists_customers_escaped() {
        let html = render_index(
            &PageConfig::default(),
            &["metro".to_string(), "A&B".to_string()],
            "/upload_file",
        )
        .unwrap();
        assert!(html.contains(r#"<option value="metro">metro</option>"#));
        assert!(html.contains(r#"<option value="A&amp;B">A&amp;B</option>"#));
        assert!(html.contains(r#"action="/upload_file""#));
    }

    #[test]
    fn test_render_reflects_policy() {
        let page = PageConfig {
            policy: AcceptancePolicy::Pdf {
                max_bytes: 8 * 1024 * 1024,
            },
            ..PageConfig::default()
        };
        let html = render_index(&page, &[], "/upload_file").unwrap();
        assert!(html.contains(r#"accept=".pdf""#));
        assert!(html.contains("Maximum size: 8 MB"));
        assert!(html.contains(r#"id="pdfFile""#));
    }

    #[test]
    fn test_render_states_fractional_ceiling() {
        let page = PageConfig {
            policy: AcceptancePolicy::Pdf {
                max_bytes: 20_000_000,
            },
            ..PageConfig::default()
        };
        let html = render_index(&page, &[], "/upload_file").unwrap();
        assert!(html.contains("Maximum size: 19.07 MB"));
    }

    #[test]
    fn test_render_embeds_config_as_string_literal() {
        let html = render_index(&PageConfig::default(), &[], "/upload_file").unwrap();
        let start = html.find("start_index_page(").unwrap() + "start_index_page(".len();
        let end = html[start..].find(");").unwrap() + start;
        let literal: String = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(PageConfig::from_json(&literal).unwrap(), PageConfig::default());
    }

    #[test]
    fn test_no_placeholders_left() {
        let html = render_index(&PageConfig::default(), &["x".to_string()], "/u").unwrap();
        for placeholder in ["{action}", "{customer_options}", "{input_id}", "{accept}", "{max_size}", "{config_literal}"] {
            assert!(!html.contains(placeholder), "{placeholder} left in page");
        }
    }
}
