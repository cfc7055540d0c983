//! Interactive prompting.
//!
//! [`Prompter`] abstracts the terminal so command flows can be driven by
//! scripted answers in tests. The CLI implements it with dialoguer.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::error::Result;

/// Asks the user questions
pub trait Prompter {
    /// Choose one of `items` with incremental fuzzy filtering; returns the
    /// index into `items`.
    fn fuzzy_select(&self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Choose one of `items` from a plain list; returns the index into `items`.
    fn select(&self, prompt: &str, items: &[String]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Free-text answer that must not be blank
    fn input(&self, prompt: &str, default: &str) -> Result<String>;

    /// Status line shown between questions
    fn note(&self, message: &str);
}

/// Candidates matching `query`, best match first.
///
/// Uses the skim scorer (the one dialoguer's fuzzy select uses). Candidates
/// with equal scores keep their input order.
pub fn fuzzy_filter<'a>(query: &str, candidates: &'a [String]) -> Vec<&'a str> {
    if query.is_empty() {
        return candidates.iter().map(String::as_str).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize, &str)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| matcher.fuzzy_match(c, query).map(|score| (score, i, c.as_str())))
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, c)| c).collect()
}

/// Let the user pick a resource from a sorted, fuzzy-filterable list.
///
/// Returns `None` without prompting when there is nothing to choose from.
/// A single candidate is still offered for explicit selection.
pub fn select_resource(
    prompter: &impl Prompter,
    resources: &[String],
    prompt: &str,
) -> Result<Option<String>> {
    if resources.is_empty() {
        return Ok(None);
    }

    let mut sorted = resources.to_vec();
    sorted.sort();
    let index = prompter.fuzzy_select(prompt, &sorted)?;
    Ok(sorted.get(index).cloned())
}

/// Close matches for a resource name that is not in the manifest
pub fn suggest(name: &str, resources: &[String]) -> Vec<String> {
    let mut sorted = resources.to_vec();
    sorted.sort();
    fuzzy_filter(name, &sorted)
        .into_iter()
        .take(3)
        .map(str::to_string)
        .collect()
}
