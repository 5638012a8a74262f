use super::error::ConvertError;
use super::types::InputDocument;

/// Parse a Dynmap `markers.yml` document
pub fn parse_input(yaml: &str) -> Result<InputDocument, ConvertError> {
    let document: InputDocument = serde_yaml::from_str(yaml)?;
    log::debug!("Parsed input with {} marker sets", document.sets.len());
    Ok(document)
}
