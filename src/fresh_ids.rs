use std::collections::{HashMap, HashSet};

/// Bases that name primitive literals keep their lower-case spelling.
const PRIMITIVE_TAGS: [&str; 3] = ["number", "string", "boolean"];

/// Mints one fresh id per base name, in input order.
///
/// Each distinct base gets its own counter starting at 1, so `["IfExp",
/// "IfExp"]` yields `IfExp_1, IfExp_2`. Candidates found in `forbidden`, or
/// already handed out by this call, are skipped.
pub fn fresh_ids<S: AsRef<str>>(bases: &[S], forbidden: &HashSet<String>) -> Vec<String> {
    IdAllocator::new(forbidden.clone()).mint_all(bases)
}

/// An allocator that remembers every name it has handed out, for callers
/// that mint ids batch after batch.
///
/// Counters are kept per rendered prefix. Every index at or below a counter
/// is taken, so resuming from it yields the same names as restarting at 1.
#[derive(Debug, Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl IdAllocator {
    pub fn new(taken: HashSet<String>) -> Self {
        Self {
            taken,
            counters: HashMap::new(),
        }
    }

    pub fn mint(&mut self, base: &str) -> String {
        let prefix = prefix(base);
        let counter = self.counters.entry(prefix.clone()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{prefix}_{counter}");
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    pub fn mint_all<S: AsRef<str>>(&mut self, bases: &[S]) -> Vec<String> {
        bases.iter().map(|base| self.mint(base.as_ref())).collect()
    }
}

fn prefix(base: &str) -> String {
    if PRIMITIVE_TAGS.contains(&base) {
        base.to_string()
    } else {
        capitalize(base)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
