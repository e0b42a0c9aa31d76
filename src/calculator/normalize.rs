//! Input normalization for the calculator.
//!
//! Rewrites what the user typed into the canonical form the expression
//! parser understands: decimal commas become points, implicit
//! multiplication becomes an explicit `*`, and keypad glyphs are mapped to
//! their ASCII operators.

/// Strip newlines, turn decimal commas into points and trim the input.
///
/// This is the text shown back to the user in history entries for plain
/// arithmetic.
pub fn clean(raw: &str) -> String {
    raw.replace('\n', "").replace(',', ".").trim().to_string()
}

/// Normalize raw input into an expression ready for [`super::build`].
///
/// Returns an empty string when there is nothing to calculate.
pub fn normalize(raw: &str) -> String {
    let cleaned = clean(raw);
    let chars: Vec<char> = cleaned.chars().map(map_glyph).collect();

    let mut result = String::with_capacity(chars.len() + chars.len() / 2);
    for (i, &c) in chars.iter().enumerate() {
        result.push(c);

        if let Some(&next) = chars.get(i + 1)
            && needs_multiplication(c, next)
        {
            result.push('*');
        }
    }

    result
}

/// Map keypad glyphs onto the characters the parser expects.
fn map_glyph(c: char) -> char {
    match c {
        '÷' => '/',
        'X' => 'x',
        other => other,
    }
}

/// Check if an explicit `*` belongs between two adjacent characters.
fn needs_multiplication(prev: char, next: char) -> bool {
    // 2x, 2(, 2log
    let after_digit = prev.is_ascii_digit() && (next == '(' || next.is_ascii_lowercase());
    // )2, )x, )log
    let after_paren = prev == ')' && (next.is_ascii_digit() || next.is_ascii_lowercase());

    after_digit || after_paren
}
