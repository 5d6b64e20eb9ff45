//! Page template splicing

use crate::error::TemplateError;

/// Marker replaced by the generated fragment
pub const PLACEHOLDER: &str = "{{GENERATED_HTML_GOES_HERE}}";

/// Replace the single [`PLACEHOLDER`] in `template` with `html`.
pub fn apply_template(template: &str, html: &str) -> Result<String, TemplateError> {
    let count = template.matches(PLACEHOLDER).count();
    if count != 1 {
        return Err(TemplateError::Placeholder {
            placeholder: PLACEHOLDER,
            count,
        });
    }
    Ok(template.replacen(PLACEHOLDER, html, 1))
}
