//! Utilities for generating passwords.

use std::collections::HashSet;

use rand::distributions::Slice;
use rand::rngs::OsRng;
use rand::seq::index;
use rand::{CryptoRng, Rng};

use crate::{GenerateError, Secret};

pub static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub static DIGITS: &str = "0123456789";
/// Printable ASCII punctuation, space excluded.
pub static PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// What a password should be made of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordSpec {
    pub length: i64,
    pub include_upper: bool,
    pub include_digits: bool,
    pub include_special: bool,
    pub exclude: String,
}

impl PasswordSpec {
    /// The unfiltered character list: lowercase, then each enabled class in a fixed order.
    pub fn charlist(&self) -> Vec<char> {
        let mut chars = Vec::new();
        for class in self.classes() {
            chars.extend(class.chars());
        }
        chars
    }

    /// The enabled character classes, lowercase always first.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![LOWERCASE];
        if self.include_upper {
            classes.push(UPPERCASE);
        }
        if self.include_digits {
            classes.push(DIGITS);
        }
        if self.include_special {
            classes.push(PUNCTUATION);
        }
        classes
    }

    /// Oversampling factor: one per enabled class.
    pub fn multiplier(&self) -> usize {
        self.classes().len()
    }

    /// The characters a password may be drawn from, once exclusions are applied.
    ///
    /// Note the exclusion check compares the number of distinct excluded characters against the
    /// size of the *unfiltered* list, whether or not those characters actually occur in it. This
    /// rejects some inputs that would leave a usable pool (e.g. excluding 26 digits-and-symbols
    /// from a lowercase-only list), and is kept that way on purpose.
    pub fn pool(&self) -> Result<Vec<char>, GenerateError> {
        let charlist = self.charlist();
        if self.exclude.is_empty() {
            return Ok(charlist);
        }
        let exclude: HashSet<char> = self.exclude.chars().collect();
        if exclude.len() >= charlist.len() {
            return Err(GenerateError::PoolExhausted {
                excluded: exclude.len(),
                available: charlist.len(),
            });
        }
        Ok(charlist
            .into_iter()
            .filter(|c| !exclude.contains(c))
            .collect())
    }
}

/// Generate a password from the operating system's random source.
pub fn generate(
    length: i64,
    include_upper: bool,
    include_digits: bool,
    include_special: bool,
    exclude: &str,
) -> Result<Secret, GenerateError> {
    let spec = PasswordSpec {
        length,
        include_upper,
        include_digits,
        include_special,
        exclude: exclude.to_owned(),
    };
    generate_password(&mut OsRng, &spec)
}

/// Generate a password by sampling the spec's character pool.
///
/// `length * multiplier` characters are first drawn uniformly, with replacement, from the pool;
/// `length` of those are then picked without replacement, in the order they were picked. The
/// second step doesn't change the per-position distribution, but the output is expected to match
/// that two-stage procedure.
///
/// `rand`'s uniform range sampler re-samples rather than reducing modulo the range, so neither
/// stage is biased.
pub fn generate_password<R>(rng: &mut R, spec: &PasswordSpec) -> Result<Secret, GenerateError>
where
    R: Rng + CryptoRng,
{
    let length =
        usize::try_from(spec.length).map_err(|_| GenerateError::InvalidLength(spec.length))?;
    let pool = spec.pool()?;
    if length == 0 {
        return Ok(Secret(String::new()));
    }

    let available = pool.len();
    let chars = Slice::new(&pool).map_err(|_| GenerateError::PoolExhausted {
        excluded: spec.exclude.chars().collect::<HashSet<_>>().len(),
        available,
    })?;
    let oversampled = (0..length * spec.multiplier())
        .map(|_| *rng.sample(&chars))
        .collect::<Vec<char>>();

    let mut secret = Secret(String::with_capacity(length));
    for idx in index::sample(rng, oversampled.len(), length).iter() {
        secret.0.push(oversampled[idx]);
    }
    Ok(secret)
}
