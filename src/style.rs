//! Shared typographic scale

pub const COVER_TITLE_SIZE: f64 = 32.0;
pub const SECTION_TITLE_SIZE: f64 = 20.0;
pub const SUBHEADING_SIZE: f64 = 13.0;
pub const BODY_SIZE: f64 = 11.0;
pub const SMALL_SIZE: f64 = 9.0;

/// Vertical advance per wrapped line
pub fn line_height(size: f64) -> f64 {
    size * 1.5
}

/// Space taken by a section heading including its underline and gap
pub fn section_heading_height() -> f64 {
    SECTION_TITLE_SIZE + 22.0
}

pub const CARD_PADDING: f64 = 12.0;
pub const CARD_RADIUS: f64 = 6.0;
pub const BULLET_INDENT: f64 = 14.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_height_scales() {
        assert_eq!(line_height(BODY_SIZE), 16.5);
        assert!(section_heading_height() > line_height(SECTION_TITLE_SIZE));
    }
}
