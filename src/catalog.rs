// Data-loading boundary: parse and validate slide tables before they reach the carousel.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::CarouselError;
use crate::types::{SlideId, SlideItem};

/// Parse a JSON array of slide records.
///
/// Rejects records without alt text and duplicate ids. Order is preserved.
pub fn parse_slides(json: &str) -> Result<Vec<SlideItem>, CarouselError> {
    let slides: Vec<SlideItem> = serde_json::from_str(json)?;
    ensure_unique_ids(&slides)?;
    log::debug!("loaded {} slides", slides.len());
    Ok(slides)
}

/// Slide record for a runtime addition. The id is optional here.
#[derive(Debug, Deserialize)]
struct NewSlideRecord {
    #[serde(default)]
    id: Option<SlideId>,
    image: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    alt: String,
}

/// Parse a single slide record, using `fallback_id` when the record has no id.
pub fn parse_new_slide(json: &str, fallback_id: SlideId) -> Result<SlideItem, CarouselError> {
    let record: NewSlideRecord = serde_json::from_str(json)?;
    SlideItem::new(
        record.id.unwrap_or(fallback_id),
        record.image,
        record.title,
        record.description,
        record.alt,
    )
}

pub fn ensure_unique_ids(slides: &[SlideItem]) -> Result<(), CarouselError> {
    let mut seen = HashSet::with_capacity(slides.len());
    for slide in slides {
        if !seen.insert(slide.id()) {
            return Err(CarouselError::DuplicateSlideId { id: slide.id() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENTORING: &str = r#"[
        {"id":1,"image":"./assets/mentor-firra-1.jpeg","title":"Career Strategy Session",
         "description":"One-on-one mentoring session.","alt":"Firra conducting a career strategy mentoring session"},
        {"id":2,"image":"./assets/mentor-firra-2.jpeg","title":"Skills Development Guidance",
         "description":"Personalized skills assessment.","alt":"Firra providing skills development guidance"}
    ]"#;

    #[test]
    fn parses_table_in_order() {
        let slides = parse_slides(MENTORING).unwrap();
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0].id(), SlideId::new(1));
        assert_eq!(slides[1].title(), "Skills Development Guidance");
    }

    #[test]
    fn empty_alt_is_rejected() {
        let json = r#"[{"id":1,"image":"a.jpg","title":"A","description":"d","alt":""}]"#;
        let err = parse_slides(json).unwrap_err();
        assert!(err.to_string().contains("alt text"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id":4,"image":"a.jpg","alt":"a"},
            {"id":4,"image":"b.jpg","alt":"b"}
        ]"#;
        let err = parse_slides(json).unwrap_err();
        assert!(matches!(err, CarouselError::DuplicateSlideId { id } if id == SlideId::new(4)));
    }

    #[test]
    fn empty_table_is_fine() {
        assert!(parse_slides("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            parse_new_slide("{", SlideId::new(1)),
            Err(CarouselError::Serialization(_))
        ));
    }

    #[test]
    fn new_slide_keeps_its_own_id() {
        let json = r#"{"id":12,"image":"a.jpg","title":"A","description":"d","alt":"a"}"#;
        let slide = parse_new_slide(json, SlideId::new(6)).unwrap();
        assert_eq!(slide.id(), SlideId::new(12));
    }

    #[test]
    fn new_slide_without_id_takes_fallback() {
        let json = r#"{"image":"a.jpg","title":"A","description":"d","alt":"a"}"#;
        let slide = parse_new_slide(json, SlideId::new(6)).unwrap();
        assert_eq!(slide.id(), SlideId::new(6));
    }

    #[test]
    fn new_slide_still_requires_alt_text() {
        let json = r#"{"image":"a.jpg","title":"A"}"#;
        assert!(matches!(
            parse_new_slide(json, SlideId::new(6)),
            Err(CarouselError::MissingAltText { .. })
        ));
    }
}
