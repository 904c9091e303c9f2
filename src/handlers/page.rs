use crate::aspects::Aspect;
use crate::upload::UploadedImage;

/// Everything one render of the page needs. The page is stateless between
/// requests; whatever was submitted is echoed back so the form keeps the
/// user's last choices.
#[derive(Debug, Default)]
pub struct PageView {
    pub selected: Vec<Aspect>,
    pub preview: Option<PreviewView>,
    pub critique: Option<String>,
    pub error: Option<ErrorView>,
}

#[derive(Debug)]
pub struct PreviewView {
    pub data_uri: String,
    pub caption: String,
}

#[derive(Debug)]
pub struct ErrorView {
    pub message: String,
    /// Selection-count problems render as a warning, everything else as an
    /// error.
    pub warning: bool,
}

impl PreviewView {
    pub fn from_upload(upload: &UploadedImage) -> Self {
        let name = upload.file_name.as_deref().unwrap_or("Uploaded Photo");
        let caption = match upload.dimensions {
            Some((w, h)) => format!("{name} ({w}\u{d7}{h})"),
            None => name.to_string(),
        };
        PreviewView {
            data_uri: upload.as_data_uri(),
            caption,
        }
    }
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn render_aspect_checkboxes(selected: &[Aspect]) -> String {
    let mut html = String::new();
    for aspect in Aspect::ALL {
        let label = aspect.label();
        let checked = if selected.contains(&aspect) {
            " checked"
        } else {
            ""
        };
        html.push_str(&format!(
            "        <label class=\"aspect\"><input type=\"checkbox\" name=\"aspects\" \
             value=\"{label}\"{checked}> {label}</label>\n"
        ));
    }
    html
}

fn render_output(view: &PageView) -> String {
    let mut html = String::new();

    if let Some(preview) = &view.preview {
        html.push_str(&format!(
            "      <figure class=\"preview\">\n        <img src=\"{}\" alt=\"Uploaded photo\">\n        <figcaption>{}</figcaption>\n      </figure>\n",
            preview.data_uri,
            escape_html(&preview.caption)
        ));
    }

    if let Some(error) = &view.error {
        let class = if error.warning { "warning" } else { "error" };
        html.push_str(&format!(
            "      <p class=\"{class}\">{}</p>\n",
            escape_html(&error.message)
        ));
    }

    if let Some(critique) = &view.critique {
        html.push_str(&format!(
            "      <section class=\"critique\">\n        <h2>Photo Critique</h2>\n        <pre>{}</pre>\n      </section>\n",
            escape_html(critique)
        ));
    }

    html
}

/// Renders the whole single-page UI: sidebar aspect picker, upload control,
/// submit button, and the output area (preview, critique text, or inline
/// error).
pub fn render_page(view: &PageView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>PhotoCritique</title>
  <style>
    body {{ font-family: sans-serif; margin: 0; display: flex; min-height: 100vh; }}
    aside {{ width: 16rem; padding: 1rem; background: #f4f4f4; }}
    main {{ flex: 1; padding: 1rem 2rem; max-width: 48rem; }}
    .aspect {{ display: block; margin: 0.3rem 0; }}
    .preview img {{ max-width: 100%; }}
    .warning {{ color: #8a6d00; background: #fff8dc; padding: 0.6rem; }}
    .error {{ color: #a00000; background: #ffecec; padding: 0.6rem; }}
    .critique pre {{ white-space: pre-wrap; font-family: inherit; }}
  </style>
</head>
<body>
  <form method="post" action="/critique" enctype="multipart/form-data" style="display: contents">
    <aside>
      <h2>Critique Options</h2>
      <p>Select any 3 aspects to critique:</p>
{aspects}    </aside>
    <main>
      <h1>PhotoCritique App</h1>
      <p><input type="file" name="photo" accept=".jpg,.jpeg,.png"></p>
      <p><button type="submit">Get Critique</button></p>
{output}    </main>
  </form>
</body>
</html>
"#,
        aspects = render_aspect_checkboxes(&view.selected),
        output = render_output(view),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::DEFAULT_SELECTION;

    #[test]
    fn renders_all_six_aspects_with_defaults_checked() {
        let view = PageView {
            selected: DEFAULT_SELECTION.to_vec(),
            ..PageView::default()
        };
        let html = render_page(&view);
        for aspect in Aspect::ALL {
            assert!(html.contains(aspect.label()));
        }
        assert_eq!(html.matches("checked").count(), 3);
        assert!(html.contains("value=\"Focus and Sharpness\" checked"));
        assert!(!html.contains("value=\"Exposure\" checked"));
    }

    #[test]
    fn escapes_model_text_before_embedding() {
        let view = PageView {
            critique: Some("<script>alert(1)</script> & more".to_string()),
            ..PageView::default()
        };
        let html = render_page(&view);
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn selection_warnings_use_the_warning_class() {
        let view = PageView {
            error: Some(ErrorView {
                message: "Please select exactly 3 aspects for the critique.".to_string(),
                warning: true,
            }),
            ..PageView::default()
        };
        let html = render_page(&view);
        assert!(html.contains("class=\"warning\""));
        assert!(html.contains("Please select exactly 3 aspects"));
    }

    #[test]
    fn preview_caption_includes_dimensions_when_known() {
        let preview = PreviewView::from_upload(&UploadedImage {
            bytes: vec![1, 2, 3],
            mime_type: "image/png".to_string(),
            file_name: Some("cat.png".to_string()),
            dimensions: Some((640, 480)),
        });
        assert_eq!(preview.caption, "cat.png (640\u{d7}480)");
        assert!(preview.data_uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn upload_control_accepts_only_the_allowed_extensions() {
        let html = render_page(&PageView::default());
        assert!(html.contains("accept=\".jpg,.jpeg,.png\""));
    }
}
