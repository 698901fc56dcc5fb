//! HTML page wrapping extracted PDF text.

/// Build the HTML page for text extracted from a PDF.
///
/// The text is untrusted upstream output and is escaped before it is placed
/// inside the `<pre>` block.
pub fn pdf_text_page(text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Extracted PDF Content</title>
  <style>
    body {{ font-family: Arial, sans-serif; margin: 20px; }}
    pre {{ white-space: pre-wrap; word-wrap: break-word; }}
  </style>
</head>
<body>
  <h1>Extracted PDF Content</h1>
  <pre>{}</pre>
</body>
</html>
"#,
        htmlescape::encode_minimal(text)
    )
}
