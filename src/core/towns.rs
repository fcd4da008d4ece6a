/// Procedural town names for the town category.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;

const ROOTS: &[&str] = &[
    "Ash", "Black", "Bram", "Bright", "Cold", "Crow", "Dun", "Elm", "Fair", "Fox", "Glen", "Gold",
    "Hart", "High", "Iron", "Kings", "Lang", "Mill", "North", "Oak", "Pen", "Raven", "Red", "Salt",
    "Stone", "Thorn", "Wester", "White", "Wolf", "Yew",
];

const SUFFIXES: &[&str] = &[
    "bridge", "bury", "by", "dale", "field", "ford", "gate", "ham", "holm", "mere", "moor",
    "mouth", "stead", "ton", "well", "wick", "worth",
];

/// Generate up to `count` distinct town names.
///
/// Fewer names come back only when `count` exceeds the number of possible
/// root and suffix combinations.
pub fn generate_town_names(count: usize, rng: &mut StdRng) -> Vec<String> {
    let mut combos: Vec<(usize, usize)> = (0..ROOTS.len())
        .flat_map(|r| (0..SUFFIXES.len()).map(move |s| (r, s)))
        .collect();
    combos.shuffle(rng);

    let mut seen = FxHashSet::default();
    let mut names = Vec::with_capacity(count.min(combos.len()));
    for (r, s) in combos {
        if names.len() >= count {
            break;
        }
        let name = format!("{}{}", ROOTS[r], SUFFIXES[s]);
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generates_requested_number_of_distinct_names() {
        let mut rng = StdRng::seed_from_u64(30);
        let names = generate_town_names(30, &mut rng);
        assert_eq!(names.len(), 30);
        let unique: FxHashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), 30);
        for name in &names {
            assert!(name.chars().next().is_some_and(char::is_uppercase), "{}", name);
        }
    }

    #[test]
    fn caps_at_available_combinations() {
        let mut rng = StdRng::seed_from_u64(1);
        let names = generate_town_names(usize::MAX, &mut rng);
        assert_eq!(names.len(), ROOTS.len() * SUFFIXES.len());
    }

    #[test]
    fn same_seed_same_names() {
        let a = generate_town_names(10, &mut StdRng::seed_from_u64(8));
        let b = generate_town_names(10, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
