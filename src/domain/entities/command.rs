use std::collections::HashMap;
use std::fmt;

/// The closed vocabulary of intents the assistant understands.
///
/// Variants are declared in lexicographic label order; that order is the
/// deterministic tie-break when two commands score identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalCommand {
    Cancel,
    Confirm,
    Help,
    Menu,
    No,
    Yes,
}

impl CanonicalCommand {
    pub const ALL: [CanonicalCommand; 6] = [
        CanonicalCommand::Cancel,
        CanonicalCommand::Confirm,
        CanonicalCommand::Help,
        CanonicalCommand::Menu,
        CanonicalCommand::No,
        CanonicalCommand::Yes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CanonicalCommand::Cancel => "cancel",
            CanonicalCommand::Confirm => "confirm",
            CanonicalCommand::Help => "help",
            CanonicalCommand::Menu => "menu",
            CanonicalCommand::No => "no",
            CanonicalCommand::Yes => "yes",
        }
    }
}

impl fmt::Display for CanonicalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of matching raw user input against the vocabulary.
///
/// `command` is `None` when nothing scored at or above the acceptance
/// threshold; `confidence` still carries the best score for observability.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMatch {
    pub input_raw: String,
    pub command: Option<CanonicalCommand>,
    pub confidence: f64,
}

impl CommandMatch {
    pub fn is_recognized(&self) -> bool {
        self.command.is_some()
    }
}

/// Command vocabulary: canonical labels, known typo/synonym aliases and
/// emoji shortcuts.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// (command, fuzzy terms) in lexicographic command order
    entries: Vec<(CanonicalCommand, Vec<&'static str>)>,
    /// exact lookups: labels, aliases and emoji
    exact: HashMap<&'static str, CanonicalCommand>,
}

impl Vocabulary {
    /// The assistant's standard vocabulary.
    pub fn standard() -> Self {
        let aliases: [(CanonicalCommand, &[&'static str]); 6] = [
            (CanonicalCommand::Cancel, &["canel", "cnacel", "stop", "abort"]),
            (CanonicalCommand::Confirm, &["cnofirm", "confrim", "accept"]),
            (
                CanonicalCommand::Help,
                &["hlep", "halp", "hep", "assist", "support", "?"],
            ),
            (
                CanonicalCommand::Menu,
                &["memu", "menus", "men", "mneu", "mnu"],
            ),
            (CanonicalCommand::No, &["n", "nope", "nah", "not"]),
            (
                CanonicalCommand::Yes,
                &["y", "ye", "yse", "ys", "ok", "okay", "affirmative"],
            ),
        ];
        let emoji: [(&'static str, CanonicalCommand); 2] =
            [("👍", CanonicalCommand::Yes), ("❌", CanonicalCommand::No)];

        let mut entries = Vec::new();
        let mut exact = HashMap::new();
        for (command, terms) in aliases {
            exact.insert(command.label(), command);
            let mut fuzzy_terms = vec![command.label()];
            for term in terms {
                exact.insert(*term, command);
                fuzzy_terms.push(*term);
            }
            entries.push((command, fuzzy_terms));
        }
        for (symbol, command) in emoji {
            exact.insert(symbol, command);
        }

        Self { entries, exact }
    }

    /// Exact label/alias/emoji lookup.
    pub fn exact(&self, input: &str) -> Option<CanonicalCommand> {
        self.exact.get(input).copied()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.exact.contains_key(term)
    }

    /// All (command, term) pairs eligible for fuzzy scoring, in lexicographic
    /// command order.
    pub fn candidates(&self) -> impl Iterator<Item = (CanonicalCommand, &str)> {
        self.entries
            .iter()
            .flat_map(|(command, terms)| terms.iter().map(move |t| (*command, *t)))
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}
