//! Text encoding and cleanup for the standard Type1 fonts
//!
//! Every string is drawn through WinAnsiEncoding (CP1252). Measurement
//! uses the same byte stream, so measured and drawn widths agree.

/// Encode a single character as a WinAnsi byte, `None` when it has no slot
pub fn winansi_byte(ch: char) -> Option<u8> {
    let code = ch as u32;
    match ch {
        '\t' => Some(b' '),
        _ if (0x20..0x7F).contains(&code) => Some(code as u8),
        // Latin-1 supplement maps onto itself
        _ if (0xA0..=0xFF).contains(&code) => Some(code as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        'ƒ' => Some(0x83),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '†' => Some(0x86),
        '‡' => Some(0x87),
        'ˆ' => Some(0x88),
        '‰' => Some(0x89),
        'Š' => Some(0x8A),
        '‹' => Some(0x8B),
        'Œ' => Some(0x8C),
        'Ž' => Some(0x8E),
        '\u{2018}' => Some(0x91),
        '\u{2019}' => Some(0x92),
        '\u{201C}' => Some(0x93),
        '\u{201D}' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '˜' => Some(0x98),
        '™' => Some(0x99),
        'š' => Some(0x9A),
        '›' => Some(0x9B),
        'œ' => Some(0x9C),
        'ž' => Some(0x9E),
        'Ÿ' => Some(0x9F),
        _ => None,
    }
}

/// Convert a Unicode string to WinAnsiEncoding bytes
///
/// Characters outside the code page become `?`. Control characters are
/// dropped.
pub fn unicode_to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .filter(|ch| !ch.is_control() || *ch == '\t')
        .map(|ch| winansi_byte(ch).unwrap_or(b'?'))
        .collect()
}

fn is_emoji(ch: char) -> bool {
    matches!(ch as u32,
        0x1F300..=0x1F6FF
        | 0x1F1E0..=0x1F1FF
        | 0x1F900..=0x1F9FF
        | 0x2600..=0x27BF
        | 0xFE0F
        | 0x200D
    )
}

fn normalize_char(ch: char) -> Option<char> {
    match ch {
        '\u{00A0}' | '\u{2007}' | '\u{202F}' | '\u{2009}' | '\u{200A}' => Some(' '),
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => Some('-'),
        '\u{2015}' => Some('—'),
        '\u{201B}' | '\u{2032}' => Some('\''),
        '\u{201F}' | '\u{2033}' => Some('"'),
        '\u{2022}' | '\u{25CF}' | '\u{25AA}' => Some('•'),
        '\u{200B}' | '\u{FEFF}' => None,
        c if is_emoji(c) => None,
        c => Some(c),
    }
}

/// Strip a leading markdown heading marker (`#`, `##`, `###`)
fn strip_heading_marker(line: &str) -> &str {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    if (1..=3).contains(&hashes) {
        let rest = &trimmed[hashes..];
        if rest.is_empty() || rest.starts_with(' ') {
            return rest.trim_start();
        }
    }
    line
}

/// Clean user or AI supplied text before it is measured and drawn
pub fn sanitize(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .split('\n')
        .map(|line| {
            strip_heading_marker(line)
                .chars()
                .filter_map(normalize_char)
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
