// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text sanitizer — fold user text into the glyph set the built-in PDF faces
// can draw.
//
// Typographic punctuation becomes its ASCII counterpart and a fixed table of
// accented Latin letters loses its accents. Anything else outside ASCII is
// left as-is: it may still show up as a missing glyph in the output. The
// function never fails and applying it twice changes nothing.

/// Normalise `text` for drawing. Absent input becomes an empty string.
pub fn sanitize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match fold_char(ch) {
            Folded::Keep => out.push(ch),
            Folded::One(replacement) => out.push(replacement),
            Folded::Many(replacement) => out.push_str(replacement),
        }
    }
    out
}

/// Sanitize and substitute a dash for blank values.
pub fn sanitize_or_dash(text: Option<&str>) -> String {
    let cleaned = sanitize(text);
    if cleaned.trim().is_empty() {
        "-".into()
    } else {
        cleaned
    }
}

enum Folded {
    Keep,
    One(char),
    Many(&'static str),
}

fn fold_char(ch: char) -> Folded {
    if ch.is_ascii() {
        return Folded::Keep;
    }
    match ch {
        // Quotes
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => Folded::One('\''),
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' => Folded::One('"'),
        '\u{00AB}' | '\u{00BB}' => Folded::One('"'),

        // Dashes
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
        | '\u{2212}' => Folded::One('-'),
        '\u{2022}' => Folded::One('-'),

        '\u{2026}' => Folded::Many("..."),

        // Spaces
        '\u{00A0}' | '\u{2002}' | '\u{2003}' | '\u{2007}' | '\u{2009}' | '\u{202F}' => {
            Folded::One(' ')
        }

        // Latin accents
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => Folded::One('a'),
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => Folded::One('A'),
        'è' | 'é' | 'ê' | 'ë' => Folded::One('e'),
        'È' | 'É' | 'Ê' | 'Ë' => Folded::One('E'),
        'ì' | 'í' | 'î' | 'ï' => Folded::One('i'),
        'Ì' | 'Í' | 'Î' | 'Ï' => Folded::One('I'),
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => Folded::One('o'),
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => Folded::One('O'),
        'ù' | 'ú' | 'û' | 'ü' => Folded::One('u'),
        'Ù' | 'Ú' | 'Û' | 'Ü' => Folded::One('U'),
        'ç' => Folded::One('c'),
        'Ç' => Folded::One('C'),
        'ñ' => Folded::One('n'),
        'Ñ' => Folded::One('N'),
        'ÿ' => Folded::One('y'),
        'Ÿ' => Folded::One('Y'),
        'œ' => Folded::Many("oe"),
        'Œ' => Folded::Many("OE"),
        'æ' => Folded::Many("ae"),
        'Æ' => Folded::Many("AE"),

        _ => Folded::Keep,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_and_dashes() {
        assert_eq!(sanitize(Some("café – 100%")), "cafe - 100%");
        assert_eq!(sanitize(Some("Élodie — Ndiaye")), "Elodie - Ndiaye");
        assert_eq!(sanitize(Some("Cœur")), "Coeur");
    }

    #[test]
    fn curly_quotes_become_straight() {
        assert_eq!(sanitize(Some("\u{201C}quoted\u{201D}")), "\"quoted\"");
        assert_eq!(sanitize(Some("l\u{2019}atelier")), "l'atelier");
    }

    #[test]
    fn ellipsis_and_spaces() {
        assert_eq!(sanitize(Some("wait\u{2026}")), "wait...");
        assert_eq!(sanitize(Some("1\u{202F}000\u{00A0}FCFA")), "1 000 FCFA");
    }

    #[test]
    fn absent_and_empty_input() {
        assert_eq!(sanitize(None), "");
        assert_eq!(sanitize(Some("")), "");
        assert_eq!(sanitize_or_dash(None), "-");
        assert_eq!(sanitize_or_dash(Some("   ")), "-");
        assert_eq!(sanitize_or_dash(Some("42")), "42");
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(sanitize(Some("ß → 日本")), "ß → 日本");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let samples = [
            "",
            "plain ascii",
            "café – 100%",
            "\u{201C}Très\u{201D} chère\u{2026}",
            "ŒUVRE\u{00A0}d\u{2019}art",
            "mixed ß 日本 — ÿ",
            "\u{2212}5 \u{00AB}ok\u{00BB}",
        ];
        for sample in samples {
            let once = sanitize(Some(sample));
            let twice = sanitize(Some(once.as_str()));
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }
}
