//! Property-based tests for tree induction.
//!
//! Random datasets and limits; every grown tree must be valid, respect its
//! limits and be reproducible from the same seed.

use proptest::collection::vec as prop_vec;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use rftree::{
    Dataset, GreedySplitter, Parallelism, Predictor, RandomSplitter, SplitStrategy,
    ThresholdSplit, Tree, TreeGrower, TreeParams,
};

// =============================================================================
// Generators
// =============================================================================

/// Small values so duplicates (and constant features) are common.
fn arb_dataset() -> impl Strategy<Value = Dataset> {
    (1usize..40, 1usize..5).prop_flat_map(|(rows, cols)| {
        (
            prop_vec(0u8..6, rows * cols),
            prop_vec(-3i8..4, rows),
        )
            .prop_map(move |(x, y)| {
                let x = x.into_iter().map(f32::from).collect();
                let y = y.into_iter().map(f32::from).collect();
                Dataset::from_vec(x, rows, cols, y).expect("shape matches")
            })
    })
}

fn arb_params() -> impl Strategy<Value = TreeParams> {
    (0u32..6, 1usize..6, 1usize..4, 1usize..5, 1usize..60, 0.0f32..0.5).prop_map(
        |(max_depth, min_split, min_leaf, max_features, max_nodes, eps)| {
            TreeParams::builder()
                .max_depth(max_depth)
                .min_samples_to_split(min_split)
                .min_samples_in_leaf(min_leaf)
                .max_features(max_features)
                .max_num_nodes(max_nodes)
                .epsilon_purity(eps)
                .build()
                .expect("generated params are valid")
        },
    )
}

fn grow<const K: usize, St: SplitStrategy<K, Split = ThresholdSplit>>(
    data: &Dataset,
    params: &TreeParams,
    strategy: St,
    seed: u64,
) -> Tree<ThresholdSplit, K> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    TreeGrower::<K, St>::new(params.clone(), strategy)
        .grow(data, &mut rng)
        .expect("dataset is not empty")
}

fn check_laws<const K: usize>(
    tree: &Tree<ThresholdSplit, K>,
    data: &Dataset,
    params: &TreeParams,
) -> Result<(), TestCaseError> {
    prop_assert!(tree.validate().is_ok(), "{:?}", tree.validate());
    prop_assert!(tree.n_nodes() <= params.max_num_nodes.max(1));
    prop_assert!(tree.max_depth() <= params.max_depth);
    prop_assert_eq!(tree.sample_indices().len(), data.n_samples());
    prop_assert_eq!((tree.n_nodes() - 1) % K, 0);

    // every leaf below the root comes from a kept split
    for (id, stats) in tree.iter_leaves() {
        prop_assert!(id == 0 || stats.n_samples as usize >= params.min_samples_in_leaf);
    }
    Ok(())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn greedy_binary_trees_obey_limits(data in arb_dataset(), params in arb_params(), seed in any::<u64>()) {
        let tree = grow::<2, _>(&data, &params, GreedySplitter::new(), seed);
        check_laws(&tree, &data, &params)?;
    }

    #[test]
    fn random_ternary_trees_obey_limits(data in arb_dataset(), params in arb_params(), seed in any::<u64>()) {
        let tree = grow::<3, _>(&data, &params, RandomSplitter, seed);
        check_laws(&tree, &data, &params)?;
    }

    #[test]
    fn greedy_quaternary_trees_obey_limits(data in arb_dataset(), params in arb_params(), seed in any::<u64>()) {
        let tree = grow::<4, _>(&data, &params, GreedySplitter::new(), seed);
        check_laws(&tree, &data, &params)?;
    }

    #[test]
    fn growth_is_deterministic(data in arb_dataset(), params in arb_params(), seed in any::<u64>()) {
        let a = grow::<3, _>(&data, &params, RandomSplitter, seed);
        let b = grow::<3, _>(&data, &params, RandomSplitter, seed);
        prop_assert_eq!(a.nodes(), b.nodes());
        prop_assert_eq!(a.sample_indices(), b.sample_indices());
    }

    #[test]
    fn training_instances_route_to_their_leaf(data in arb_dataset(), params in arb_params(), seed in any::<u64>()) {
        let tree = grow::<2, _>(&data, &params, RandomSplitter, seed);
        let predictor = Predictor::new(&tree);
        let features = data.features();
        for (id, _) in tree.iter_leaves() {
            for &sample in tree.leaf_samples(id).unwrap() {
                let row = features.row(sample as usize);
                prop_assert_eq!(predictor.predict_leaf(&row).unwrap(), id);
            }
        }
    }

    #[test]
    fn batch_prediction_preserves_order(data in arb_dataset(), params in arb_params(), seed in any::<u64>()) {
        let tree = grow::<2, _>(&data, &params, GreedySplitter::new(), seed);
        let predictor = Predictor::new(&tree);
        let seq = predictor.predict(&data, Parallelism::Sequential).unwrap();
        let par = predictor.predict(&data, Parallelism::Parallel).unwrap();
        prop_assert_eq!(&seq, &par);
        for (i, row) in data.features().rows().into_iter().enumerate() {
            prop_assert_eq!(predictor.predict_row(&row).unwrap(), seq[i]);
        }
    }
}
