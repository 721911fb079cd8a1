//! "Did you mean ...?" suggestion lists for unknown-name diagnostics.

use itertools::Itertools;
use levenshtein::levenshtein;

const MAX_SUGGESTIONS: usize = 5;

/// Ranks `options` by edit distance from `input`, keeping only those within
/// the GraphQL reference threshold (`floor(len * 0.4) + 1`), nearest first.
pub fn suggestion_list<'a>(input: &str, options: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let threshold = 1 + (input.len() as f64 * 0.4).floor() as usize;
    let input_lowercase = input.to_lowercase();

    let mut ranked: Vec<(&str, usize)> = options
        .into_iter()
        .filter_map(|option| {
            let distance = if input_lowercase == option.to_lowercase() {
                1
            } else {
                levenshtein(input, option)
            };
            (distance <= threshold).then_some((option, distance))
        })
        .collect();

    ranked.sort_by_key(|(_, distance)| *distance);
    ranked.into_iter().map(|(s, _)| s).collect()
}

/// Formats up to [`MAX_SUGGESTIONS`] quoted names as an English list:
/// `"A"`, `"A" or "B"`, `"A", "B", or "C"`.
pub fn quoted_or_list(names: &[&str]) -> String {
    let names = &names[..names.len().min(MAX_SUGGESTIONS)];
    match names {
        [] => String::new(),
        [only] => format!("\"{only}\""),
        [first, second] => format!("\"{first}\" or \"{second}\""),
        many => {
            let (last, rest) = many.split_last().unwrap();
            format!(
                "{}, or \"{last}\"",
                rest.iter().map(|n| format!("\"{n}\"")).join(", ")
            )
        }
    }
}

/// `" Did you mean \"A\" or \"B\"?"`, or an empty string if there are no
/// suggestions.
pub fn did_you_mean(names: &[&str]) -> String {
    if names.is_empty() {
        return String::new();
    }
    format!(" Did you mean {}?", quoted_or_list(names))
}
