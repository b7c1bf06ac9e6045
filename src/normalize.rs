//! Rewrites generator output into a speakable plain-text form.
//!
//! Generator replies may embed math notation (LaTeX commands or Unicode
//! symbols). Synthesis engines read that aloud badly, so sentences pass
//! through this rewrite before the engine call. Pure text-to-text function;
//! re-running it on already-expanded text may double-expand ambiguous
//! patterns, so it is applied exactly once per sentence.

use regex::Regex;
use std::sync::LazyLock;

static MATH_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(.*?)\$").expect("valid regex"));
static FRACTION: LazyLock<Regex> = LazyLock::new(|| {
    // Non-greedy, tolerates one level of nested braces in each argument.
    Regex::new(r"\\frac\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}\{([^{}]*(?:\{[^{}]*\}[^{}]*)*)\}")
        .expect("valid regex")
});
static LEADING_MINUS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s|^)-(\d+)").expect("valid regex"));
static LEADING_MINUS_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\s|^)-([a-zA-Z0-9]+)").expect("valid regex"));
static INFIX_MINUS_NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("valid regex"));
static INFIX_MINUS_IDENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z0-9]+)\s*-\s*([a-zA-Z0-9]+)").expect("valid regex"));
static RESIDUAL_BRACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[{}]").expect("valid regex"));

/// LaTeX command and exponent rewrites, applied in order.
const COMMAND_WORDS: &[(&str, &str)] = &[
    (r"\\times", " times "),
    (r"\\div", " divided by "),
    (r"\\leq", " less than or equal to "),
    (r"\\geq", " greater than or equal to "),
    (r"\\pm", " plus or minus "),
    (r"\^2", " squared "),
    (r"\^3", " cubed "),
    (r"\^", " to the power of "),
    (r"\\sqrt", " square root of "),
    (r"\\sum", " sum "),
    (r"\\int", " integral of "),
];

/// Greek letter commands, rewritten to their bare names.
const GREEK_WORDS: &[(&str, &str)] = &[
    (r"\\alpha", "alpha"),
    (r"\\beta", "beta"),
    (r"\\gamma", "gamma"),
    (r"\\delta", "delta"),
    (r"\\epsilon", "epsilon"),
];

static COMMAND_REGEXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    COMMAND_WORDS
        .iter()
        .map(|(pattern, word)| (Regex::new(pattern).expect("valid regex"), *word))
        .collect()
});

static GREEK_REGEXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    GREEK_WORDS
        .iter()
        .map(|(pattern, word)| (Regex::new(pattern).expect("valid regex"), *word))
        .collect()
});

/// Unicode symbol forms of the same operators, mapped before the LaTeX
/// passes (generators emit both spellings).
const SYMBOL_WORDS: &[(&str, &str)] = &[
    ("×", " times "),
    ("÷", " divided by "),
    ("≤", " less than or equal to "),
    ("≥", " greater than or equal to "),
    ("±", " plus or minus "),
    ("√", " square root of "),
    ("Σ", " sum "),
    ("∫", " integral of "),
    ("α", "alpha"),
    ("β", "beta"),
    ("γ", "gamma"),
    ("δ", "delta"),
    ("ε", "epsilon"),
];

/// Rewrites math notation in `text` into spoken words.
///
/// The output keeps the original's spacing quirks (inserted words carry
/// surrounding spaces); callers collapse whitespace as needed.
pub fn speakable(text: &str) -> String {
    let mut out = text.to_string();

    for (symbol, word) in SYMBOL_WORDS {
        if out.contains(symbol) {
            out = out.replace(symbol, word);
        }
    }

    out = MATH_DELIMITERS.replace_all(&out, "${1}").into_owned();

    for (regex, word) in COMMAND_REGEXES.iter() {
        out = regex.replace_all(&out, *word).into_owned();
    }

    out = FRACTION.replace_all(&out, "${1} over ${2}").into_owned();

    for (regex, word) in GREEK_REGEXES.iter() {
        out = regex.replace_all(&out, *word).into_owned();
    }

    out = LEADING_MINUS_NUMBER
        .replace_all(&out, "${1}negative ${2}")
        .into_owned();
    out = LEADING_MINUS_IDENT
        .replace_all(&out, "${1}negative ${2}")
        .into_owned();
    out = INFIX_MINUS_NUMBERS
        .replace_all(&out, "${1} minus ${2}")
        .into_owned();
    out = INFIX_MINUS_IDENTS
        .replace_all(&out, "${1} minus ${2}")
        .into_owned();

    RESIDUAL_BRACES.replace_all(&out, "").into_owned()
}
