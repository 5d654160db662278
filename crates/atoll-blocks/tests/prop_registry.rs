use atoll_blocks::{BlockRegistry, BlockType};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

proptest! {
    // Any code describes to a known type; unknown codes fall back to air
    #[test]
    fn every_code_describes(id in any::<u8>()) {
        let reg = BlockRegistry::builtin();
        let b = reg.describe_id(id);
        if (id as usize) < BlockType::COUNT {
            prop_assert_eq!(b.id.id(), id);
        } else {
            prop_assert!(b.is_air());
        }
    }

    // Drops never exceed the table and only name listed items
    #[test]
    fn drops_are_subset_of_table(id in 0u8..BlockType::COUNT as u8, seed in any::<u64>()) {
        let reg = BlockRegistry::builtin();
        let t = BlockType::from_id_or_air(id);
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let drops = reg.roll_drops(t, &mut rng);
        let table = &reg.get(t).drops;
        prop_assert!(drops.len() <= table.len());
        for d in drops {
            prop_assert!(table.iter().any(|r| r.item == d.item && r.count == d.count));
        }
    }
}
