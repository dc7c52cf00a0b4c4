use stepviz::{BubbleSort, Distribution, MergeSort, QuickSort, SortConfig, SortEngine, Stepper};

fn config(size: usize, distribution: Distribution, seed: u64) -> SortConfig {
    SortConfig {
        size,
        distribution,
        seed: Some(seed),
        ..SortConfig::default()
    }
}

fn engines(config: &SortConfig) -> Vec<Box<dyn SortEngine>> {
    vec![
        Box::new(BubbleSort::new(config).unwrap()),
        Box::new(MergeSort::new(config).unwrap()),
        Box::new(QuickSort::new(config).unwrap()),
    ]
}

/// Runs to completion and returns the number of `step_once` calls made.
fn run(engine: &mut dyn SortEngine) -> usize {
    let n = engine.array().len();
    let limit = 4 * (n + 1) * (n + 1) + 16;
    let mut calls = 0;
    while !engine.is_complete() {
        engine.step_once();
        calls += 1;
        assert!(calls <= limit, "{} did not finish on {n} elements", engine.name());
    }
    calls
}

#[test]
fn every_engine_sorts_every_distribution() {
    for distribution in Distribution::ALL {
        for size in 0..=60 {
            let config = config(size, distribution, size as u64);
            for mut engine in engines(&config) {
                let mut expected = engine.array().to_vec();
                expected.sort_unstable();

                run(engine.as_mut());
                assert_eq!(
                    engine.array(),
                    expected.as_slice(),
                    "{} on {distribution} size {size}",
                    engine.name()
                );
            }
        }
    }
}

#[test]
fn runs_are_deterministic() {
    let config = config(35, Distribution::Random, 1234);
    let trace = |mut engine: Box<dyn SortEngine>| {
        let mut frames = Vec::new();
        while !engine.is_complete() {
            engine.step_once();
            frames.push((engine.array().to_vec(), engine.highlights().clone()));
        }
        frames
    };

    for (a, b) in engines(&config).into_iter().zip(engines(&config)) {
        assert_eq!(trace(a), trace(b));
    }
}

#[test]
fn highlights_never_leak_past_completion() {
    let config = config(25, Distribution::Reverse, 8);
    for mut engine in engines(&config) {
        run(engine.as_mut());
        assert!(engine.highlights().is_empty(), "{}", engine.name());
        let before = engine.array().to_vec();
        let steps = engine.steps();
        engine.step_once();
        assert_eq!(engine.array(), before.as_slice());
        assert_eq!(engine.steps(), steps);
    }
}

#[test]
fn reset_is_idempotent() {
    let config = config(30, Distribution::Nearly, 77);
    for mut engine in engines(&config) {
        for _ in 0..17 {
            engine.step_once();
        }
        engine.reset();
        assert!(!engine.is_complete());
        assert!(engine.highlights().is_empty());
        assert_eq!(engine.steps(), 0);
        assert_eq!(engine.array().len(), 30);

        engine.reset();
        assert!(!engine.is_complete());
        assert!(engine.highlights().is_empty());
    }
}

#[test]
fn resizing_mid_run_restarts_cleanly() {
    let config = config(40, Distribution::Random, 21);
    for mut engine in engines(&config) {
        for _ in 0..50 {
            engine.step_once();
        }
        engine.set_size(10).unwrap();
        assert_eq!(engine.array().len(), 10);
        assert_eq!(engine.steps(), 0);
        run(engine.as_mut());
        assert!(engine.array().windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn highlighted_indices_stay_in_bounds() {
    let config = config(33, Distribution::Random, 5);
    for mut engine in engines(&config) {
        let n = engine.array().len();
        while !engine.is_complete() {
            engine.step_once();
            let h = engine.highlights();
            let ranges = [&h.merging, &h.dividing, &h.partition];
            assert!(h.comparing.iter().chain(&h.swapped).all(|&i| i < n));
            assert!(ranges.iter().flat_map(|r| r.iter()).all(|r| *r.end() < n));
            assert!(h.pivot.is_none_or(|p| p < n));
        }
    }
}

#[test]
fn generate_switches_size_and_distribution() {
    for mut engine in engines(&config(10, Distribution::Random, 2)) {
        engine.generate(6, Distribution::Reverse).unwrap();
        assert_eq!(engine.array(), &[6, 5, 4, 3, 2, 1]);
        assert!(!engine.is_complete());

        assert!(engine.generate(5000, Distribution::Sorted).is_err());
        assert_eq!(engine.array(), &[6, 5, 4, 3, 2, 1]);
    }
}
