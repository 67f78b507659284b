use std::ops::Range;
use std::sync::OnceLock;

use fbds_core::OcrFields;
use regex::Regex;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_base_year,
    r"(?i)\bano(?:[\s\-]+base)?\s*[:\-]?\s*((?:19|20)\d{2})\b");
re!(re_sirgas,
    r"(?i)\bsirgas\s*[\-/]?\s*((?:19|20)\d{2})\b");
re!(re_any_year,
    r"\b((?:19|20)\d{2})\b");

// ── Public extraction API ─────────────────────────────────────────────────────

/// Pulls the base year and the SIRGAS datum year out of a map legend.
pub struct CaptionExtractor;

impl CaptionExtractor {
    pub fn extract(ocr_text: &str) -> OcrFields {
        let sirgas = re_sirgas().captures(ocr_text).and_then(|c| c.get(1));
        let base = Self::extract_base_year(ocr_text, sirgas.map(|m| m.range()));

        OcrFields {
            raw_text: Some(ocr_text.to_string()),
            primary: base,
            secondary: sirgas.map(|m| m.as_str().to_string()),
        }
    }

    fn extract_base_year(text: &str, datum_span: Option<Range<usize>>) -> Option<String> {
        if let Some(m) = re_base_year().captures(text).and_then(|c| c.get(1)) {
            return Some(m.as_str().to_string());
        }
        // Unlabeled: first year that is not the datum's own year.
        re_any_year()
            .captures_iter(text)
            .filter_map(|c| c.get(1))
            .find(|m| datum_span.as_ref().map_or(true, |span| !overlaps(span, &m.range())))
            .map(|m| m.as_str().to_string())
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_base_year_and_datum() {
        let f = CaptionExtractor::extract("Ano Base: 2015\n\nDatum SIRGAS 2000");
        assert_eq!(f.primary.as_deref(), Some("2015"));
        assert_eq!(f.secondary.as_deref(), Some("2000"));
        assert_eq!(f.raw_text.as_deref(), Some("Ano Base: 2015\n\nDatum SIRGAS 2000"));
    }

    #[test]
    fn label_variants() {
        assert_eq!(CaptionExtractor::extract("ANO-BASE 2013").primary.as_deref(), Some("2013"));
        assert_eq!(CaptionExtractor::extract("Ano: 2011").primary.as_deref(), Some("2011"));
        assert_eq!(CaptionExtractor::extract("ano base 1998").primary.as_deref(), Some("1998"));
    }

    #[test]
    fn sirgas_without_space() {
        let f = CaptionExtractor::extract("Datum: SIRGAS2000 / UTM 23S");
        assert_eq!(f.secondary.as_deref(), Some("2000"));
    }

    #[test]
    fn unlabeled_year_skips_the_datum() {
        let f = CaptionExtractor::extract("Datum SIRGAS 2000\nImagens RapidEye 2013");
        assert_eq!(f.primary.as_deref(), Some("2013"));
        assert_eq!(f.secondary.as_deref(), Some("2000"));
    }

    #[test]
    fn labeled_year_wins_over_earlier_years() {
        let f = CaptionExtractor::extract("Fonte: IBGE 2010\nAno Base: 2015");
        assert_eq!(f.primary.as_deref(), Some("2015"));
    }

    #[test]
    fn nothing_found() {
        let f = CaptionExtractor::extract("MAPA DE USO DO SOLO\nEscala 1:50.000");
        assert_eq!(f.primary, None);
        assert_eq!(f.secondary, None);
    }

    #[test]
    fn datum_only_leaves_base_year_empty() {
        let f = CaptionExtractor::extract("SIRGAS 2000");
        assert_eq!(f.primary, None);
        assert_eq!(f.secondary.as_deref(), Some("2000"));
    }

    #[test]
    fn no_panic_on_garbage_input() {
        let _ = CaptionExtractor::extract("!@#$%^&*()\n\0\x01\x02");
        let _ = CaptionExtractor::extract("");
    }
}
