// Copyright 2026 Boutique Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tab completion for the interactive storefront.
//!
//! Provides context-aware completion for slash commands, filter keys,
//! category names (from the loaded catalog), sort keys, and tag values.

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

/// All available storefront slash commands.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/browse", "Show the current page of results"),
    ("/filter", "Toggle a filter, e.g. /filter category=men"),
    ("/search", "Set or clear the search term"),
    ("/price", "Set the price range, e.g. /price 25-120"),
    ("/tag", "Filter by tag (flash-sale, featured)"),
    ("/sort", "Set sort order (newest, price-asc, price-desc)"),
    ("/page", "Go to a page: /page 2, /page next, /page prev"),
    ("/chips", "List active filters"),
    ("/remove", "Remove an active filter by number"),
    ("/reset", "Clear all filters"),
    ("/add", "Add a product to the cart: /add <id> [qty] [size]"),
    ("/cart", "Show cart contents"),
    ("/checkout", "Place a pending order from the cart"),
    ("/catalog", "Show catalog summary"),
    ("/clear", "Clear the screen"),
    ("/help", "Show available commands"),
    ("/exit", "Quit the storefront"),
];

/// Sort keys for /sort completion.
const SORT_KEYS: &[&str] = &["newest", "price-asc", "price-desc"];

/// Recognized values for /tag completion.
const TAG_VALUES: &[&str] = &["flash-sale", "featured"];

/// Filter keys for /filter completion.
const FILTER_KEYS: &[&str] = &["category=", "size=", "color="];

/// Storefront helper providing tab completion.
pub struct ShopHelper {
    /// Category labels from the loaded catalog, for `/filter category=`.
    categories: Vec<String>,
}

impl ShopHelper {
    pub fn new(categories: Vec<String>) -> Self {
        Self { categories }
    }
}

/// Suggest the closest command for an unknown input, if any is close.
pub fn suggest_command(cmd: &str) -> Option<&'static str> {
    let cmd = cmd.trim_start_matches('/');
    // Prefix match first
    for (name, _) in COMMANDS {
        if name[1..].starts_with(cmd) {
            return Some(name);
        }
    }
    // Then a small edit distance
    COMMANDS
        .iter()
        .map(|(name, _)| (*name, edit_distance(cmd, &name[1..])))
        .filter(|(_, d)| *d <= 2)
        .min_by_key(|(_, d)| *d)
        .map(|(name, _)| name)
}

fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut prev, &mut current);
    }
    prev[b.len()]
}

fn complete_from(options: &[&str], input: &str, full: &str) -> (usize, Vec<Pair>) {
    let prefix_start = full.len() - input.len();
    let matches: Vec<Pair> = options
        .iter()
        .filter(|o| o.starts_with(input.trim()))
        .map(|o| Pair {
            display: o.to_string(),
            replacement: format!("{o} "),
        })
        .collect();
    (prefix_start, matches)
}

impl Completer for ShopHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        // Complete command names if input starts with /
        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<12} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // Split into command and args
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };

        match cmd {
            "/sort" => Ok(complete_from(SORT_KEYS, args, input)),
            "/tag" => Ok(complete_from(TAG_VALUES, args, input)),
            "/page" => Ok(complete_from(&["next", "prev"], args, input)),
            "/filter" => {
                // Complete the key, then category values after `category=`
                let token = args.rsplit(' ').next().unwrap_or(args);
                let token_start = input.len() - token.len();

                if let Some(value) = token.strip_prefix("category=") {
                    let matches: Vec<Pair> = self
                        .categories
                        .iter()
                        .filter(|c| c.starts_with(value))
                        .map(|c| Pair {
                            display: c.clone(),
                            replacement: format!("category={c} "),
                        })
                        .collect();
                    return Ok((token_start, matches));
                }

                let matches: Vec<Pair> = FILTER_KEYS
                    .iter()
                    .filter(|k| k.starts_with(token))
                    .map(|k| Pair {
                        display: k.to_string(),
                        replacement: k.to_string(),
                    })
                    .collect();
                Ok((token_start, matches))
            }
            _ => Ok((pos, Vec::new())),
        }
    }
}

impl Hinter for ShopHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        // Show first matching command as ghost text
        if line.starts_with('/') && !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for ShopHelper {}
impl Validator for ShopHelper {}
impl Helper for ShopHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_command() {
        assert_eq!(suggest_command("bro"), Some("/browse"));
        assert_eq!(suggest_command("chekout"), Some("/checkout"));
        assert_eq!(suggest_command("xyzzy"), None);
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("cart", "cart"), 0);
        assert_eq!(edit_distance("cart", "chart"), 1);
        assert_eq!(edit_distance("sort", "search"), 5);
    }
}
