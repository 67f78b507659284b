/// Flatten OCR text into a single CSV-safe line.
///
/// CR, LF and commas become spaces, double quotes become single quotes,
/// then whitespace runs collapse to one space with the ends trimmed.
/// Commas are replaced rather than deleted so `Campinas,SP` keeps two words.
/// Applying it twice gives the same result as applying it once.
pub fn clean_full_text(raw: &str) -> String {
    let mapped: String = raw
        .chars()
        .map(|c| match c {
            '\r' | '\n' | ',' => ' ',
            '"' => '\'',
            other => other,
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
