//! Status input for `adr update`: exact matching with suggestions, and an
//! interactive menu when no status is given

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};

use crate::domain::all_status_names;

/// Largest edit distance still offered as a suggestion
const SUGGESTION_DISTANCE: usize = 3;

/// Returns the Levenshtein edit distance between two strings
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (curr[j] + 1).min(prev[j + 1] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Returns the candidate closest to `input`; ties go to the earliest
pub fn closest<'a>(input: &str, candidates: &[&'a str]) -> Option<(&'a str, usize)> {
    candidates
        .iter()
        .map(|c| (*c, levenshtein(input, c)))
        .fold(None, |best, (c, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((c, d)),
        })
}

/// Resolves user input to a lower-case status name
///
/// Only exact (case-insensitive) names are accepted. Close misses get a
/// "did you mean" hint; anything else lists the valid names.
pub fn resolve_status(input: &str) -> Result<&'static str> {
    let lower = input.trim().to_lowercase();
    let names = all_status_names();

    if let Some(name) = names.iter().find(|n| **n == lower) {
        return Ok(*name);
    }

    match closest(&lower, &names) {
        Some((best, distance)) if distance <= SUGGESTION_DISTANCE => {
            bail!("unknown status {:?}, did you mean {:?}?", input, best)
        }
        _ => bail!("unknown status {:?}, valid statuses: {}", input, names.join(", ")),
    }
}

/// Shows a numbered status menu on `out` and reads the choice from `input`
pub fn prompt_status<R: BufRead, W: Write>(mut input: R, mut out: W) -> Result<&'static str> {
    let names = all_status_names();

    writeln!(out, "Select a status:")?;
    for (i, name) in names.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, name)?;
    }
    write!(out, "Enter choice: ")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("reading choice")?;
    if read == 0 {
        bail!("invalid choice: no input");
    }

    let line = line.trim();
    match line.parse::<usize>() {
        Ok(choice) if (1..=names.len()).contains(&choice) => Ok(names[choice - 1]),
        _ => bail!("invalid choice: {:?}", line),
    }
}
