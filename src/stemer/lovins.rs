use super::rules::{ENDINGS, MIN_STEM_LEN, RESPELLINGS, UNDOUBLE, ends_with_str};

fn remove_ending(word: &mut Vec<char>) -> bool {
    for ending in ENDINGS {
        let n = ending.suffix.chars().count();
        if word.len() < n + MIN_STEM_LEN || !ends_with_str(word, ending.suffix) {
            continue;
        }
        let stem_len = word.len() - n;
        if ending.condition.holds(&word[..stem_len]) {
            word.truncate(stem_len);
            return true;
        }
    }
    false
}

fn undouble(word: &mut Vec<char>) {
    let n = word.len();
    if n >= 2 && word[n - 1] == word[n - 2] && UNDOUBLE.contains(&word[n - 1]) {
        word.pop();
    }
}

fn respell(word: &mut Vec<char>) {
    if let Some(rule) = RESPELLINGS.iter().find(|rule| rule.matches(word)) {
        let new_len = word.len() - rule.suffix.chars().count();
        word.truncate(new_len);
        word.extend(rule.replacement.chars());
    }
}

/// Lovins stem of a lower-cased token.
///
/// Upper-case input is not folded; it simply matches no ending. The result
/// is never longer than the input: the recoding pass only runs after an
/// ending of at least one char was removed, and adds at most one back.
pub fn lovins_stem(token: &str) -> String {
    let mut word: Vec<char> = token.chars().collect();

    if remove_ending(&mut word) {
        undouble(&mut word);
        respell(&mut word);
    }

    word.into_iter().collect()
}
