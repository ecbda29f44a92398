//! `--auto`: pick random values for every option the user didn't give.

use std::fmt;

use fast_password::PasswordSpec;
use rand::seq::index;
use rand::{CryptoRng, Rng};

use crate::Args;

pub(crate) const MIN_LENGTH: i64 = 8;
pub(crate) const MAX_LENGTH: i64 = 24;
/// At most this many tenths of the number of enabled classes get excluded, rounded down.
const EXCLUSION_TENTHS: usize = 3;

/// The values auto mode picked. `None` means the option came from the command line.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct AutoChoices {
    pub(crate) length: Option<i64>,
    pub(crate) upper: Option<bool>,
    pub(crate) nums: Option<bool>,
    pub(crate) special: Option<bool>,
    pub(crate) exclude: Option<String>,
}

impl fmt::Display for AutoChoices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AutoOption(")?;
        if let Some(length) = self.length {
            write!(f, " length: {length}")?;
        }
        if let Some(upper) = self.upper {
            write!(f, " upper: {upper}")?;
        }
        if let Some(nums) = self.nums {
            write!(f, " nums: {nums}")?;
        }
        if let Some(special) = self.special {
            write!(f, " special: {special}")?;
        }
        if let Some(exclude) = self.exclude.as_deref() {
            write!(f, " exclude({}): '{exclude}'", exclude.chars().count())?;
        }
        f.write_str(" )")
    }
}

/// Build a password spec from `args`, choosing randomly for anything not given explicitly.
///
/// A boolean flag is only "given" when it was passed, i.e. when it's `true`. The exclusion is
/// picked last, from the character list of the final class selection.
pub(crate) fn fill_unspecified<R>(rng: &mut R, args: &Args) -> (PasswordSpec, AutoChoices)
where
    R: Rng + CryptoRng,
{
    let mut choices = AutoChoices::default();
    let length = match args.length {
        Some(length) => length,
        None => *choices
            .length
            .insert(rng.gen_range(MIN_LENGTH..=MAX_LENGTH)),
    };
    let mut spec = PasswordSpec {
        length,
        include_upper: pick_flag(rng, args.upper, &mut choices.upper),
        include_digits: pick_flag(rng, args.nums, &mut choices.nums),
        include_special: pick_flag(rng, args.special, &mut choices.special),
        exclude: String::new(),
    };
    spec.exclude = match args.exclude.as_ref() {
        Some(exclude) => exclude.clone(),
        None => choices.exclude.insert(random_exclusion(rng, &spec)).clone(),
    };
    (spec, choices)
}

fn pick_flag<R: Rng>(rng: &mut R, given: bool, choice: &mut Option<bool>) -> bool {
    if given {
        true
    } else {
        *choice.insert(rng.gen())
    }
}

/// Pick a handful of distinct positions of `spec`'s character list to exclude.
pub(crate) fn random_exclusion<R>(rng: &mut R, spec: &PasswordSpec) -> String
where
    R: Rng + CryptoRng,
{
    let charlist = spec.charlist();
    let max = spec.classes().len() * EXCLUSION_TENTHS / 10;
    let count = rng.gen_range(0..=max);
    index::sample(rng, charlist.len(), count)
        .iter()
        .map(|idx| charlist[idx])
        .collect()
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fast-pass").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn explicit_options_are_kept() {
        let args = args(&["-a", "-l", "30", "-u", "-n", "-s", "-e", "!"]);
        for seed in 0..50 {
            let (spec, choices) = fill_unspecified(&mut StdRng::seed_from_u64(seed), &args);
            assert_eq!(choices, AutoChoices::default());
            assert_eq!(
                spec,
                PasswordSpec {
                    length: 30,
                    include_upper: true,
                    include_digits: true,
                    include_special: true,
                    exclude: "!".to_owned(),
                }
            );
        }
    }

    #[test]
    fn unspecified_options_are_chosen() {
        let args = args(&["-a"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut saw_upper = [false; 2];
        for _ in 0..200 {
            let (spec, choices) = fill_unspecified(&mut rng, &args);
            assert!((MIN_LENGTH..=MAX_LENGTH).contains(&spec.length));
            assert_eq!(choices.length, Some(spec.length));
            assert_eq!(choices.upper, Some(spec.include_upper));
            assert_eq!(choices.nums, Some(spec.include_digits));
            assert_eq!(choices.special, Some(spec.include_special));
            assert_eq!(choices.exclude.as_deref(), Some(spec.exclude.as_str()));
            saw_upper[spec.include_upper as usize] = true;
            // Whatever was picked has to be usable.
            assert!(fast_password::generate_password(&mut rng, &spec).is_ok());
        }
        assert_eq!(saw_upper, [true, true]);
    }

    #[test]
    fn exclusion_is_bounded_by_class_count() {
        let mut rng = StdRng::seed_from_u64(5);
        let few_classes = PasswordSpec {
            include_upper: true,
            include_digits: true,
            ..PasswordSpec::default()
        };
        for _ in 0..100 {
            assert_eq!(random_exclusion(&mut rng, &few_classes), "");
        }

        let all_classes = PasswordSpec {
            include_special: true,
            ..few_classes
        };
        let charlist = all_classes.charlist();
        let mut saw_one = false;
        for _ in 0..100 {
            let exclude = random_exclusion(&mut rng, &all_classes);
            assert!(exclude.chars().count() <= 1);
            assert!(exclude.chars().all(|c| charlist.contains(&c)));
            saw_one |= !exclude.is_empty();
        }
        assert!(saw_one);
    }

    #[test]
    fn summary_lists_only_chosen_values() {
        let choices = AutoChoices {
            length: Some(12),
            special: Some(false),
            exclude: Some("q".to_owned()),
            ..AutoChoices::default()
        };
        assert_eq!(
            choices.to_string(),
            "AutoOption( length: 12 special: false exclude(1): 'q' )"
        );
    }
}
