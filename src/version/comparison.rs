//! Gradle version ordering.
//!
//! Versions are split into parts on `.`, `-`, `_` and `+`, and again wherever digits meet
//! letters (`1.0rc1` is `1`, `0`, `rc`, `1`). Parts are then compared pairwise:
//!
//! - numeric parts compare numerically and are greater than any non-numeric part
//! - `dev` is lower than every other non-numeric part
//! - `rc`, `snapshot`, `final`, `ga`, `release` and `sp` are higher than other words, in
//!   that order
//! - remaining words compare lexically
//!
//! When one version runs out of parts, an extra numeric part makes the other version
//! greater (`1.1.0 > 1.1`) while an extra word makes it lower (`1.1-alpha < 1.1`).

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part<'a> {
    Number(u64, &'a str),
    Word(&'a str),
}

fn split(version: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    for chunk in version.split(['.', '-', '_', '+']) {
        let mut start = 0;
        let bytes = chunk.as_bytes();
        for i in 1..=bytes.len() {
            let boundary =
                i == bytes.len() || bytes[i].is_ascii_digit() != bytes[i - 1].is_ascii_digit();
            if boundary {
                let piece = &chunk[start..i];
                if !piece.is_empty() {
                    parts.push(classify(piece));
                }
                start = i;
            }
        }
    }
    parts
}

fn classify(piece: &str) -> Part<'_> {
    match piece.parse::<u64>() {
        Ok(n) if piece.bytes().all(|b| b.is_ascii_digit()) => Part::Number(n, piece),
        _ => Part::Word(piece),
    }
}

fn word_rank(word: &str) -> i8 {
    match word.to_ascii_lowercase().as_str() {
        "dev" => -1,
        "rc" => 1,
        "snapshot" => 2,
        "final" => 3,
        "ga" => 4,
        "release" => 5,
        "sp" => 6,
        _ => 0,
    }
}

fn compare_parts(a: &Part<'_>, b: &Part<'_>) -> Ordering {
    match (a, b) {
        (Part::Number(x, xs), Part::Number(y, ys)) => x.cmp(y).then_with(|| xs.len().cmp(&ys.len())),
        (Part::Number(..), Part::Word(_)) => Ordering::Greater,
        (Part::Word(_), Part::Number(..)) => Ordering::Less,
        (Part::Word(x), Part::Word(y)) => {
            let (rx, ry) = (word_rank(x), word_rank(y));
            if rx != 0 || ry != 0 {
                rx.cmp(&ry)
            } else {
                x.cmp(y)
            }
        }
    }
}

/// Compare two versions using Gradle's ordering.
///
/// ```rust
/// use gradle_deps::version::comparison::compare;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare("1.10", "1.9"), Ordering::Greater);
/// assert_eq!(compare("1.0-rc1", "1.0"), Ordering::Less);
/// ```
pub fn compare(a: &str, b: &str) -> Ordering {
    let left = split(a);
    let right = split(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ord = compare_parts(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => match left[right.len()] {
            Part::Number(..) => Ordering::Greater,
            Part::Word(_) => Ordering::Less,
        },
        Ordering::Less => match right[left.len()] {
            Part::Number(..) => Ordering::Less,
            Part::Word(_) => Ordering::Greater,
        },
    }
}
