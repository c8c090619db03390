//! Built-in metrics for the standard Type1 fonts
//!
//! Advance widths are taken from the Adobe AFM files and indexed by
//! WinAnsiEncoding byte. Units are 1/1000 em.

/// Width table covering WinAnsi codes 32..=255
type WidthTable = [u16; 224];

/// Advance widths and vertical metrics for one standard font
#[derive(Debug)]
pub struct FontMetrics {
    pub base_font: &'static str,
    widths: Option<&'static WidthTable>,
    fixed_width: u16,
    pub ascent: f64,
    pub descent: f64,
    pub cap_height: f64,
}

impl FontMetrics {
    /// Advance width of a single WinAnsi byte in 1/1000 em
    pub fn advance(&self, byte: u8) -> u16 {
        match self.widths {
            Some(table) if byte >= 32 => table[(byte - 32) as usize],
            Some(_) => 0,
            None => self.fixed_width,
        }
    }

    /// Sum of advances for an already encoded string
    pub fn advance_sum(&self, bytes: &[u8]) -> u32 {
        bytes.iter().map(|&b| self.advance(b) as u32).sum()
    }
}

#[rustfmt::skip]
static HELVETICA_WIDTHS: WidthTable = [
    // 32
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 350,
    // 128
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    // 144
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    // 160
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: WidthTable = [
    // 32
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    // 64
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    // 80
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    // 96
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // 112
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, 350,
    // 128
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    // 144
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
    // 160
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 176
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 192
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 208
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 224
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // 240
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

static HELVETICA: FontMetrics = FontMetrics {
    base_font: "Helvetica",
    widths: Some(&HELVETICA_WIDTHS),
    fixed_width: 0,
    ascent: 718.0,
    descent: -207.0,
    cap_height: 718.0,
};

static HELVETICA_BOLD: FontMetrics = FontMetrics {
    base_font: "Helvetica-Bold",
    widths: Some(&HELVETICA_BOLD_WIDTHS),
    fixed_width: 0,
    ascent: 718.0,
    descent: -207.0,
    cap_height: 718.0,
};

// Oblique shares the upright advances
static HELVETICA_OBLIQUE: FontMetrics = FontMetrics {
    base_font: "Helvetica-Oblique",
    widths: Some(&HELVETICA_WIDTHS),
    fixed_width: 0,
    ascent: 718.0,
    descent: -207.0,
    cap_height: 718.0,
};

static COURIER: FontMetrics = FontMetrics {
    base_font: "Courier",
    widths: None,
    fixed_width: 600,
    ascent: 629.0,
    descent: -157.0,
    cap_height: 562.0,
};

static COURIER_BOLD: FontMetrics = FontMetrics {
    base_font: "Courier-Bold",
    widths: None,
    fixed_width: 600,
    ascent: 629.0,
    descent: -157.0,
    cap_height: 562.0,
};

static COURIER_OBLIQUE: FontMetrics = FontMetrics {
    base_font: "Courier-Oblique",
    widths: None,
    fixed_width: 600,
    ascent: 629.0,
    descent: -157.0,
    cap_height: 562.0,
};

static STANDARD_FONTS: [&FontMetrics; 6] = [
    &HELVETICA,
    &HELVETICA_BOLD,
    &HELVETICA_OBLIQUE,
    &COURIER,
    &COURIER_BOLD,
    &COURIER_OBLIQUE,
];

/// Look up metrics by PDF base font name
pub fn metrics_for(base_font: &str) -> Option<&'static FontMetrics> {
    STANDARD_FONTS
        .iter()
        .copied()
        .find(|metrics| metrics.base_font == base_font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_advances() {
        let h = metrics_for("Helvetica").unwrap();
        assert_eq!(h.advance(b' '), 278);
        assert_eq!(h.advance(b'a'), 556);
        assert_eq!(h.advance(b'i'), 222);
        assert_eq!(h.advance(b'A'), 667);
        assert_eq!(h.advance(0xE5), 556); // å
        assert_eq!(h.advance(0xD6), 778); // Ö
        assert_eq!(h.advance(0x95), 350); // bullet

        let hb = metrics_for("Helvetica-Bold").unwrap();
        assert_eq!(hb.advance(b'b'), 611);
        assert_eq!(hb.advance(b'A'), 722);
    }

    #[test]
    fn test_courier_is_monospaced() {
        let c = metrics_for("Courier").unwrap();
        assert_eq!(c.advance_sum(b"iiii"), c.advance_sum(b"MMMM"));
        assert_eq!(c.advance_sum(b"abc"), 1800);
    }

    #[test]
    fn test_unknown_font() {
        assert!(metrics_for("Comic Sans").is_none());
        assert!(metrics_for("helvetica").is_none());
    }

    #[test]
    fn test_lookup_returns_matching_font() {
        for name in ["Helvetica", "Helvetica-Bold", "Courier-Oblique"] {
            assert_eq!(metrics_for(name).unwrap().base_font, name);
        }
    }
}
