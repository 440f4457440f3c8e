//! Table generators.
//!
//! Each generator composes a fixed multiset of glyphs, permutes it, then
//! marks a fixed number of positions as decorated. The order of draws from
//! the sequencer is frozen: reordering any line here changes every card.

use serde::Serialize;

use crate::alphabet::Alphabet;
use crate::core::CardRng;

use super::kind::TableKind;

/// One generated glyph and its decoration flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedChar {
    pub glyph: char,
    pub decorated: bool,
}

/// Generate the glyph sequence for `kind`.
pub fn generate(kind: TableKind, rng: &mut CardRng) -> Vec<GeneratedChar> {
    let base = match kind {
        TableKind::Digits15 => compose_digits15(rng),
        TableKind::Alnum25 => compose_alnum25(rng),
        TableKind::Mixed50 => compose_mixed50(rng),
    };
    debug_assert_eq!(base.len(), kind.len());
    permute_and_decorate(base, kind.decorated_count(), rng)
}

/// All ten digits plus five more drawn without replacement, so five digits
/// appear twice.
fn compose_digits15(rng: &mut CardRng) -> Vec<char> {
    let digits = Alphabet::Digits.glyphs();
    let mut base = digits.clone();
    base.extend(rng.sample(&digits, 5));
    base
}

/// Five distinct digits, ten upper-case and ten lower-case letters. The twenty
/// letters are one draw, so no letter appears in both cases.
fn compose_alnum25(rng: &mut CardRng) -> Vec<char> {
    let letters = rng.sample(&Alphabet::Upper.glyphs(), 20);
    let digits = rng.sample(&Alphabet::Digits.glyphs(), 5);

    let mut base = digits;
    base.extend_from_slice(&letters[..10]);
    base.extend(letters[10..].iter().map(char::to_ascii_lowercase));
    base
}

fn compose_mixed50(rng: &mut CardRng) -> Vec<char> {
    let mut base = Alphabet::Digits.glyphs();
    base.extend(rng.sample(&Alphabet::Upper.glyphs(), 15));
    base.extend(rng.sample(&Alphabet::Lower.glyphs(), 15));
    base.extend(rng.sample(&Alphabet::Marks.glyphs(), 10));
    base
}

fn permute_and_decorate(base: Vec<char>, decorated: usize, rng: &mut CardRng) -> Vec<GeneratedChar> {
    let shuffled = rng.shuffle(&base);
    let positions: Vec<usize> = (0..shuffled.len()).collect();
    let marked = rng.sample(&positions, decorated);

    shuffled
        .into_iter()
        .enumerate()
        .map(|(i, glyph)| GeneratedChar {
            glyph,
            decorated: marked.contains(&i),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_glyphs(chars: &[GeneratedChar]) -> Vec<char> {
        let mut glyphs: Vec<char> = chars.iter().map(|c| c.glyph).collect();
        glyphs.sort_unstable();
        glyphs
    }

    fn count_in(chars: &[GeneratedChar], alphabet: Alphabet) -> usize {
        chars.iter().filter(|c| alphabet.contains(c.glyph)).count()
    }

    fn decorated(chars: &[GeneratedChar]) -> usize {
        chars.iter().filter(|c| c.decorated).count()
    }

    #[test]
    fn test_digits15_composition() {
        let mut rng = CardRng::new(42);
        let chars = generate(TableKind::Digits15, &mut rng);

        assert_eq!(chars.len(), 15);
        assert_eq!(count_in(&chars, Alphabet::Digits), 15);
        assert_eq!(decorated(&chars), 3);

        // Every digit once, five of them twice
        let glyphs = sorted_glyphs(&chars);
        for d in Alphabet::Digits.glyphs() {
            let n = glyphs.iter().filter(|&&g| g == d).count();
            assert!((1..=2).contains(&n), "digit {d} appears {n} times");
        }
    }

    #[test]
    fn test_alnum25_composition() {
        let mut rng = CardRng::new(42);
        let chars = generate(TableKind::Alnum25, &mut rng);

        assert_eq!(chars.len(), 25);
        assert_eq!(count_in(&chars, Alphabet::Digits), 5);
        assert_eq!(count_in(&chars, Alphabet::Upper), 10);
        assert_eq!(count_in(&chars, Alphabet::Lower), 10);
        assert_eq!(decorated(&chars), 4);

        let mut glyphs = sorted_glyphs(&chars);
        glyphs.dedup();
        assert_eq!(glyphs.len(), 25);

        // Upper and lower halves come from one draw of distinct letters
        let mut folded: Vec<char> = chars
            .iter()
            .filter(|c| c.glyph.is_ascii_alphabetic())
            .map(|c| c.glyph.to_ascii_uppercase())
            .collect();
        folded.sort_unstable();
        folded.dedup();
        assert_eq!(folded.len(), 20);
    }

    #[test]
    fn test_mixed50_composition() {
        let mut rng = CardRng::new(42);
        let chars = generate(TableKind::Mixed50, &mut rng);

        assert_eq!(chars.len(), 50);
        assert_eq!(count_in(&chars, Alphabet::Digits), 10);
        assert_eq!(count_in(&chars, Alphabet::Upper), 15);
        assert_eq!(count_in(&chars, Alphabet::Lower), 15);
        assert_eq!(count_in(&chars, Alphabet::Marks), 10);
        assert_eq!(decorated(&chars), 5);

        let mut glyphs = sorted_glyphs(&chars);
        glyphs.dedup();
        assert_eq!(glyphs.len(), 50);
    }

    #[test]
    fn test_same_seed_same_table() {
        for kind in TableKind::ALL {
            let a = generate(kind, &mut CardRng::new(7));
            let b = generate(kind, &mut CardRng::new(7));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_order_is_shuffled() {
        let mut rng = CardRng::new(42);
        let chars = generate(TableKind::Mixed50, &mut rng);
        let glyphs: Vec<char> = chars.iter().map(|c| c.glyph).collect();

        // Base composition starts with the digits in order; a permutation
        // leaving that prefix intact is vanishingly unlikely.
        assert_ne!(&glyphs[..10], Alphabet::Digits.glyphs().as_slice());
    }
}
