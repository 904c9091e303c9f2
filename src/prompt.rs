use crate::aspects::AspectSelection;

/// Sentence cap per feedback section, baked into the instruction text.
const FEEDBACK_SENTENCES: usize = 3;

const PERSONA: &str = "You are an expert professional photographer. \
Please critique the uploaded photo focusing on the following aspects:";

const FORMAT_TEMPLATE: &str = "\
Provide three critique areas and three areas for improvement based on the selected aspects.
Format the response as follows:

**Critique Areas:**
1.
2.
3.

**Areas for Improvement:**
1.
2.
3.
";

/// Renders the instruction text sent to the model. Pure and deterministic:
/// the same selection (same labels, same order) always yields byte-identical
/// output, so tests can assert exact strings. No creative decisions are made
/// here; the model alone interprets the aspects.
pub fn build_prompt(selection: &AspectSelection) -> String {
    let mut prompt = String::with_capacity(512);
    prompt.push_str(PERSONA);
    prompt.push('\n');
    for aspect in selection.iter() {
        prompt.push_str("- ");
        prompt.push_str(aspect.label());
        prompt.push('\n');
    }
    prompt.push('\n');
    prompt.push_str(&format!(
        "Provide concise and actionable feedback for each selected aspect. \
         Limit each section to {FEEDBACK_SENTENCES} sentences.\n"
    ));
    prompt.push('\n');
    prompt.push_str(FORMAT_TEMPLATE);
    prompt
}
