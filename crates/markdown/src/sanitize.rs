//! Removes glyphs the report fonts cannot draw.
//!
//! Only characters inside the emoji, pictograph, dingbat, modifier and
//! variation-selector ranges are dropped. Whitespace and line structure are
//! never touched: the block parser depends on the exact blank-line layout.

/// Returns `input` with all unsupported glyphs removed.
pub fn sanitize(input: &str) -> String {
    let mut removed = 0usize;
    let output: String = input
        .chars()
        .filter(|&c| {
            let keep = !is_unsupported(c);
            if !keep {
                removed += 1;
            }
            keep
        })
        .collect();
    if removed > 0 {
        log::debug!("Sanitizer removed {} unsupported characters", removed);
    }
    output
}

/// Whether `c` falls in one of the stripped ranges.
pub fn is_unsupported(c: char) -> bool {
    matches!(
        c as u32,
        // Zero-width joiner used to glue emoji sequences.
        0x200D
        // Combining enclosing keycap.
        | 0x20E3
        // Watch, hourglass and media-control emoji in Misc Technical.
        | 0x231A..=0x231B
        | 0x2328
        | 0x23CF
        | 0x23E9..=0x23F3
        | 0x23F8..=0x23FA
        // Misc Symbols and Dingbats.
        | 0x2600..=0x27BF
        // Emoji arrows, squares and stars in Misc Symbols and Arrows.
        | 0x2B05..=0x2B07
        | 0x2B1B..=0x2B1C
        | 0x2B50
        | 0x2B55
        | 0x3030
        | 0x303D
        | 0x3297
        | 0x3299
        // Variation selectors.
        | 0xFE00..=0xFE0F
        // Mahjong through Symbols and Pictographs Extended-A, including
        // regional indicators and skin-tone modifiers.
        | 0x1F000..=0x1FAFF
        // Tag characters used in flag sequences.
        | 0xE0020..=0xE007F
        // Variation selectors supplement.
        | 0xE0100..=0xE01EF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_emoji() {
        assert_eq!(sanitize("Great work \u{1F389}!"), "Great work !");
        assert_eq!(sanitize("\u{2705} Done"), " Done");
    }

    #[test]
    fn test_removes_sequences_and_modifiers() {
        // Thumbs up with a skin tone, and a ZWJ family sequence.
        let input = "a\u{1F44D}\u{1F3FD}b\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}c";
        assert_eq!(sanitize(input), "abc");
        // Heart with a variation selector.
        assert_eq!(sanitize("x\u{2764}\u{FE0F}y"), "xy");
    }

    #[test]
    fn test_keeps_text_in_other_scripts() {
        let input = "Résumé — বাংলা 中文 العربية";
        assert_eq!(sanitize(input), input);
    }

    #[test]
    fn test_preserves_newline_count() {
        let input = "# Title \u{1F680}\n\n\n- item \u{2B50}\n\t\r\n  \u{1F525}\n";
        let output = sanitize(input);
        assert_eq!(
            output.matches('\n').count(),
            input.matches('\n').count()
        );
    }

    #[test]
    fn test_preserves_whitespace_structure() {
        let input = "  a \u{1F600} \n\t b\u{1F600}\r\n";
        let output = sanitize(input);
        let ws = |s: &str| s.chars().filter(|c| c.is_whitespace()).collect::<String>();
        assert_eq!(ws(&output), ws(input));
    }
}
