use crate::error::ImportError;
use crate::extractors::Extractor;
use crate::model::{Recipe, PLACEHOLDER_IMAGE};
use crate::text::PlainTextExtractor;
use log::info;

/// Extract a recipe from pasted or transcribed text.
///
/// Fails with [`ImportError::InsufficientData`] when no ingredients could be found,
/// so callers can send the user to manual entry.
pub fn process(text: &str, placeholder_image: Option<&str>) -> Result<Recipe, ImportError> {
    let extractor = PlainTextExtractor::new(placeholder_image.unwrap_or(PLACEHOLDER_IMAGE));
    let recipe = extractor
        .try_extract(text)
        .ok_or(ImportError::InsufficientData)?;

    info!("Extracted recipe '{}' from text", recipe.name);
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_insufficient() {
        assert!(matches!(process("", None), Err(ImportError::InsufficientData)));
        assert!(matches!(process("   \n\n", None), Err(ImportError::InsufficientData)));
    }

    #[test]
    fn test_custom_placeholder() {
        let recipe = process("Toast\nIngredients:\n- 2 slices bread", Some("/img/none.png")).unwrap();
        assert_eq!(recipe.image_src, "/img/none.png");
    }
}
