use std::future::Future;

use tracing::info;

use crate::aspects::{Aspect, AspectSelection};
use crate::error::CritiqueError;
use crate::prompt::build_prompt;
use crate::upload::UploadedImage;

/// The raw model text for one submission, displayed as-is. The requested
/// "Critique Areas / Areas for Improvement" shape is never parsed or
/// enforced locally; whatever the model returns is what the user sees.
#[derive(Debug, Clone)]
pub struct CritiqueResult {
    pub text: String,
}

/// Runs one submission end to end: validate the selection, require an
/// upload, render the prompt, make exactly one external call.
///
/// `call` is the single invocation of the generation service. It is passed
/// in (rather than a client being reached for globally) so the handler wires
/// in the real Gemini call while tests can count invocations.
///
/// Check order mirrors the original flow: the selection count gates
/// everything else, so a bad selection never reaches the upload check or
/// the external service even when no file was uploaded either.
pub async fn submit<F, Fut>(
    aspects: Vec<Aspect>,
    upload: Option<UploadedImage>,
    call: F,
) -> Result<CritiqueResult, CritiqueError>
where
    F: FnOnce(String, UploadedImage) -> Fut,
    Fut: Future<Output = anyhow::Result<String>>,
{
    let selection = AspectSelection::new(aspects)?;
    let image = upload.ok_or(CritiqueError::MissingFile)?;

    let prompt = build_prompt(&selection);
    info!(
        mime_type = %image.mime_type,
        image_bytes = image.bytes.len(),
        aspects = ?selection.iter().map(Aspect::label).collect::<Vec<_>>(),
        "Requesting critique"
    );

    let text = call(prompt, image)
        .await
        .map_err(|err| CritiqueError::External(err.to_string()))?;

    Ok(CritiqueResult { text })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn jpeg_upload() -> UploadedImage {
        UploadedImage {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            mime_type: "image/jpeg".to_string(),
            file_name: Some("photo.jpg".to_string()),
            dimensions: Some((10, 10)),
        }
    }

    fn three_aspects() -> Vec<Aspect> {
        vec![Aspect::Composition, Aspect::Lighting, Aspect::FocusAndSharpness]
    }

    fn counting_call(
        calls: Arc<AtomicUsize>,
        reply: &'static str,
    ) -> impl FnOnce(String, UploadedImage) -> std::future::Ready<anyhow::Result<String>> {
        move |_prompt, _image| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(reply.to_string()))
        }
    }

    #[tokio::test]
    async fn valid_submission_makes_exactly_one_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let result = submit(
            three_aspects(),
            Some(jpeg_upload()),
            counting_call(calls.clone(), "looks sharp"),
        )
        .await
        .unwrap();
        assert_eq!(result.text, "looks sharp");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn resubmission_is_never_deduplicated() {
        let calls = Arc::new(AtomicUsize::new(0));
        for _ in 0..2 {
            submit(
                three_aspects(),
                Some(jpeg_upload()),
                counting_call(calls.clone(), "same inputs, fresh call"),
            )
            .await
            .unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn wrong_counts_block_before_the_external_call() {
        for count in [0usize, 1, 2, 4, 5, 6] {
            let calls = Arc::new(AtomicUsize::new(0));
            let aspects: Vec<Aspect> = Aspect::ALL.into_iter().take(count).collect();
            let result = submit(
                aspects,
                Some(jpeg_upload()),
                counting_call(calls.clone(), "unreachable"),
            )
            .await;
            assert!(matches!(result, Err(CritiqueError::Selection(_))));
            assert_eq!(calls.load(Ordering::SeqCst), 0, "count {count} leaked a call");
        }
    }

    #[tokio::test]
    async fn missing_file_blocks_the_external_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let result = submit(
            three_aspects(),
            None,
            counting_call(calls.clone(), "unreachable"),
        )
        .await;
        assert!(matches!(result, Err(CritiqueError::MissingFile)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn selection_count_is_checked_before_the_missing_file() {
        let result = submit(
            vec![Aspect::Composition],
            None,
            |_p, _i| std::future::ready(Ok(String::new())),
        )
        .await;
        assert!(matches!(result, Err(CritiqueError::Selection(_))));
    }

    #[tokio::test]
    async fn call_failures_surface_the_underlying_message() {
        let result = submit(three_aspects(), Some(jpeg_upload()), |_p, _i| {
            std::future::ready(Err(anyhow::anyhow!("rate limit exceeded")))
        })
        .await;
        let err = result.unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("An error occurred"));
        assert!(rendered.contains("rate limit exceeded"));
    }

    #[tokio::test]
    async fn call_receives_the_rendered_prompt_and_image() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let seen_in_call = seen.clone();
        submit(three_aspects(), Some(jpeg_upload()), move |prompt, image| {
            *seen_in_call.lock().unwrap() = Some((prompt, image.mime_type.clone()));
            std::future::ready(Ok("ok".to_string()))
        })
        .await
        .unwrap();

        let (prompt, mime) = seen.lock().unwrap().take().unwrap();
        assert!(prompt.contains("- Composition"));
        assert!(prompt.contains("- Lighting"));
        assert!(prompt.contains("- Focus and Sharpness"));
        assert_eq!(mime, "image/jpeg");
    }
}
