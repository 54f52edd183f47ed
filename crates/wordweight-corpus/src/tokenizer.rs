//! Splitting raw text into lowercase words

use std::collections::HashMap;
use std::io::BufRead;

/// Feed every word of `text` to `process`, stopping at the first error
///
/// Words are maximal runs of alphabetic characters, lowercased. Everything else
/// separates words, so `"foo--bar"` yields `foo` and `bar`, and numbers vanish.
pub fn for_each_word<R, F, E>(mut text: R, mut process: F) -> std::result::Result<(), E>
where
    R: BufRead,
    F: FnMut(&str) -> std::result::Result<(), E>,
    E: From<std::io::Error>,
{
    let mut line = String::new();
    let mut word = String::new();
    loop {
        line.clear();
        if text.read_line(&mut line)? == 0 {
            break;
        }
        for c in line.chars() {
            if c.is_alphabetic() {
                word.extend(c.to_lowercase());
            } else if !word.is_empty() {
                process(&word)?;
                word.clear();
            }
        }
    }
    if !word.is_empty() {
        process(&word)?;
    }
    Ok(())
}

/// Count how often each word occurs in `text`
pub fn count_words<R: BufRead>(text: R) -> std::io::Result<HashMap<String, i64>> {
    let mut counts: HashMap<String, i64> = HashMap::new();
    for_each_word(text, |word| {
        *counts.entry(word.to_owned()).or_default() += 1;
        Ok::<_, std::io::Error>(())
    })?;
    Ok(counts)
}
