//! Placeholder text generation for the randomized seeding phase.

use rand::Rng;
use rand::seq::SliceRandom;

const WORDS: &[&str] = &[
    "amber", "basalt", "cedar", "delta", "ember", "fjord", "garnet", "harbor", "indigo", "juniper",
    "kestrel", "lichen", "meadow", "nimbus", "ochre", "pebble", "quartz", "russet", "sable",
    "thicket", "umber", "vernal", "willow", "zephyr",
];

fn words<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        // WORDS is a non-empty constant, so choose always yields a value.
        if let Some(word) = WORDS.choose(rng) {
            picked.push(*word);
        }
    }
    picked.join(" ")
}

/// Generate a short capitalized sentence.
pub(crate) fn sentence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(4..=8);
    let body = words(rng, count);
    let mut chars = body.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => body,
    }
}

/// Generate a couple of sentences of body text.
pub(crate) fn paragraph<R: Rng + ?Sized>(rng: &mut R) -> String {
    let count = rng.gen_range(2..=4);
    let sentences: Vec<String> = (0..count).map(|_| sentence(rng)).collect();
    sentences.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn sentences_are_capitalized_and_terminated() {
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..16 {
            let sentence = sentence(&mut rng);
            assert!(sentence.ends_with('.'));
            assert!(sentence.chars().next().is_some_and(char::is_uppercase));
        }
    }

    #[test]
    fn sentence_word_count_stays_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..32 {
            let sentence = sentence(&mut rng);
            let count = sentence.split_whitespace().count();
            assert!((4..=8).contains(&count), "unexpected word count {count}");
        }
    }

    #[test]
    fn paragraphs_contain_multiple_sentences() {
        let mut rng = SmallRng::seed_from_u64(7);

        let paragraph = paragraph(&mut rng);
        assert!(paragraph.matches('.').count() >= 2);
    }
}
