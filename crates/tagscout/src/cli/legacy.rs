//! Legacy slash switches
//!
//! Older scripts invoke the tool as
//! `tagscout /AF "<server>" /DB "<database>" /IF tags.txt /WE /WC`.
//! These switches are rewritten to their long-flag equivalents before clap
//! sees the arguments. Matching is exact and case-sensitive.

/// Switches that consume the following token as their value
const VALUE_SWITCHES: &[(&str, &str)] = &[
    ("/AF", "--server"),
    ("/DB", "--database"),
    ("/IF", "--input"),
    ("/OF", "--output"),
    ("/EF", "--errors"),
];

/// Switches that stand alone
const FLAG_SWITCHES: &[(&str, &str)] = &[("/WE", "--write-errors"), ("/WC", "--trace")];

/// Arguments after legacy translation
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    pub args: Vec<String>,
    /// Slash-style tokens that are not recognised switches
    pub invalid: Vec<String>,
}

/// Rewrite legacy switches in `args` (program name included).
///
/// Unknown slash switches are dropped and collected in `invalid`. A token
/// only counts as a switch if it is a slash followed by one to three
/// letters, so absolute paths such as `/tmp/tags.txt` pass through.
pub fn normalize_args<I>(args: I) -> NormalizedArgs
where
    I: IntoIterator<Item = String>,
{
    let mut out = NormalizedArgs::default();
    let mut iter = args.into_iter();

    if let Some(program) = iter.next() {
        out.args.push(program);
    }

    while let Some(arg) = iter.next() {
        if let Some((_, long)) = VALUE_SWITCHES.iter().find(|(s, _)| *s == arg) {
            out.args.push(long.to_string());
            match iter.next() {
                Some(value) => out.args.push(value),
                // Let clap report the missing value
                None => break,
            }
        } else if let Some((_, long)) = FLAG_SWITCHES.iter().find(|(s, _)| *s == arg) {
            out.args.push(long.to_string());
        } else if looks_like_switch(&arg) {
            out.invalid.push(arg);
        } else {
            out.args.push(arg);
        }
    }

    out
}

fn looks_like_switch(arg: &str) -> bool {
    match arg.strip_prefix('/') {
        Some(rest) => (1..=3).contains(&rest.len()) && rest.chars().all(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("tagscout")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_translates_value_switches() {
        let normalized = normalize_args(argv(&["/AF", "AF01", "/DB", "Plant Data", "/IF", "tags.txt"]));
        assert_eq!(
            normalized.args,
            argv(&["--server", "AF01", "--database", "Plant Data", "--input", "tags.txt"])
        );
        assert!(normalized.invalid.is_empty());
    }

    #[test]
    fn test_translates_flag_switches() {
        let normalized = normalize_args(argv(&["/WE", "/WC", "/OF", "out.txt", "/EF", "err.txt"]));
        assert_eq!(
            normalized.args,
            argv(&["--write-errors", "--trace", "--output", "out.txt", "--errors", "err.txt"])
        );
    }

    #[test]
    fn test_value_is_not_reinterpreted() {
        // A database literally named "/WE" stays a value
        let normalized = normalize_args(argv(&["/DB", "/WE"]));
        assert_eq!(normalized.args, argv(&["--database", "/WE"]));
    }

    #[test]
    fn test_unknown_switches_are_collected() {
        let normalized = normalize_args(argv(&["/XX", "/IF", "tags.txt", "/we"]));
        assert_eq!(normalized.args, argv(&["--input", "tags.txt"]));
        assert_eq!(normalized.invalid, vec!["/XX".to_string(), "/we".to_string()]);
    }

    #[test]
    fn test_paths_and_long_flags_pass_through() {
        let normalized = normalize_args(argv(&["--input", "/tmp/tags.txt", "-v", "--catalog", "/c.json"]));
        assert_eq!(
            normalized.args,
            argv(&["--input", "/tmp/tags.txt", "-v", "--catalog", "/c.json"])
        );
        assert!(normalized.invalid.is_empty());
    }

    #[test]
    fn test_trailing_value_switch() {
        let normalized = normalize_args(argv(&["/AF"]));
        assert_eq!(normalized.args, argv(&["--server"]));
    }
}
