//! Prompt text for listing content generation.

use super::models::{GenerationRequest, FEATURE_KEYS};

/// Soft ceiling on each description field. The model is asked to respect
/// it; nothing enforces it afterwards.
pub const MAX_SECTION_WORDS: usize = 120;

/// Build the single instruction sent to the provider.
///
/// Both inputs are embedded verbatim; the output is a pure function of the
/// request.
pub fn build_generation_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"You are a real-estate copywriter. Rewrite the raw property description below into marketing content for a property landing page.

Property address:
{address}

Raw description:
"""
{raw}
"""

Return a JSON object with:
- "title": a short, catchy headline for the listing.
- "description": an object with exactly three fields:
  - "area": a description of the neighborhood around the address above (nearby amenities, transport, atmosphere).
  - "property": a polished description of the property itself, based only on the raw description.
  - "cta": one or two sentences inviting the reader to schedule a viewing.
- "features": an object with any of these keys whose value is stated in the raw description: {keys}. Leave out every key the text does not state. Copy values as written, including units and abbreviations with embedded quotation marks.

Rules:
- Write in the same language as the raw description.
- Do not use markdown emphasis characters such as * or _ anywhere in the output.
- Do not invent facts about the property that are not in the raw description.
- Keep each description field under {max_words} words."#,
        address = request.address(),
        raw = request.raw_description(),
        keys = FEATURE_KEYS.join(", "),
        max_words = MAX_SECTION_WORDS,
    )
}
