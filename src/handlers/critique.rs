use axum::extract::multipart::{Multipart, MultipartError};
use axum::extract::State;
use axum::response::Html;
use tracing::{info, warn};

use crate::aspects::{Aspect, DEFAULT_SELECTION};
use crate::critique;
use crate::error::CritiqueError;
use crate::handlers::page::{render_page, ErrorView, PageView, PreviewView};
use crate::state::AppState;
use crate::upload::UploadedImage;

pub async fn health() -> &'static str {
    "ok"
}

/// Fresh page: six aspect checkboxes with the default three pre-checked, no
/// output yet.
pub async fn index() -> Html<String> {
    Html(render_page(&PageView {
        selected: DEFAULT_SELECTION.to_vec(),
        ..PageView::default()
    }))
}

/// What the browser posted: checked aspects in document order, plus the file
/// field when one was chosen. An empty file part (no file picked) counts as
/// no upload.
struct SubmissionForm {
    aspects: Vec<Aspect>,
    file_name: Option<String>,
    declared_mime: Option<String>,
    bytes: Vec<u8>,
}

async fn read_form(mut multipart: Multipart) -> Result<SubmissionForm, MultipartError> {
    let mut form = SubmissionForm {
        aspects: Vec::new(),
        file_name: None,
        declared_mime: None,
        bytes: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("aspects") => {
                let value = field.text().await?;
                match Aspect::from_label(&value) {
                    Some(aspect) => form.aspects.push(aspect),
                    // Only the six fixed labels exist in the form; anything
                    // else is a hand-crafted request and is ignored.
                    None => warn!("Ignoring unknown aspect value: {value}"),
                }
            }
            Some("photo") => {
                form.file_name = field
                    .file_name()
                    .map(str::to_string)
                    .filter(|name| !name.is_empty());
                form.declared_mime = field.content_type().map(str::to_string);
                form.bytes = field.bytes().await?.to_vec();
            }
            _ => {}
        }
    }

    Ok(form)
}

/// One submission: parse the form, run the validate → prompt → single-call
/// pipeline, and re-render the page with the critique or an inline error.
/// Every failure here is recoverable; the process never dies on a bad
/// submission.
pub async fn submit_critique(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Html<String> {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(err) => {
            warn!("Failed to read submission form: {err}");
            return Html(render_page(&PageView {
                selected: DEFAULT_SELECTION.to_vec(),
                error: Some(ErrorView {
                    message: format!("An error occurred: {err}"),
                    warning: false,
                }),
                ..PageView::default()
            }));
        }
    };

    let selected = form.aspects.clone();

    let upload = if form.bytes.is_empty() {
        None
    } else {
        match UploadedImage::from_upload(form.file_name, form.declared_mime, form.bytes) {
            Ok(upload) => Some(upload),
            Err(err) => {
                return Html(render_page(&PageView {
                    selected,
                    error: Some(ErrorView {
                        message: err.to_string(),
                        warning: err.is_warning(),
                    }),
                    ..PageView::default()
                }));
            }
        }
    };

    let preview = upload.as_ref().map(PreviewView::from_upload);

    let gemini = state.gemini.clone();
    let outcome = critique::submit(form.aspects, upload, move |prompt, image| async move {
        gemini.generate_critique(&prompt, &image).await
    })
    .await;

    let view = match outcome {
        Ok(result) => {
            info!("Critique delivered ({} chars)", result.text.len());
            PageView {
                selected,
                preview,
                critique: Some(result.text),
                error: None,
            }
        }
        Err(err) => {
            // Selection problems keep the preview too; the user only needs
            // to fix the checkboxes and resubmit.
            let keep_preview = !matches!(err, CritiqueError::MissingFile);
            PageView {
                selected,
                preview: if keep_preview { preview } else { None },
                critique: None,
                error: Some(ErrorView {
                    message: err.to_string(),
                    warning: err.is_warning(),
                }),
            }
        }
    };

    Html(render_page(&view))
}
