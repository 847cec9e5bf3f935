/// Named-entity extractor. Returns normalized entity names, order
/// preserving and deduplicated. Extraction never fails; an extractor with
/// nothing to say returns an empty list.
pub trait IEntityExtractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<String>;
}
