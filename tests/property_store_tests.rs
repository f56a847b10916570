use proptest::prelude::*;
use tickchart::api::{BatchEntry, ChartEngine};
use tickchart::core::{Observation, TimeSeriesStore};

#[derive(Debug, Clone)]
enum Ingest {
    Single(i64, f64),
    Batch(Vec<(i64, f64)>),
}

fn ingest_strategy() -> impl Strategy<Value = Ingest> {
    prop_oneof![
        (-1_000_000i64..1_000_000, 1.0f64..1_000.0).prop_map(|(t, p)| Ingest::Single(t, p)),
        prop::collection::vec((-1_000_000i64..1_000_000, 1.0f64..1_000.0), 0..40)
            .prop_map(Ingest::Batch),
    ]
}

fn is_sorted(observations: &[Observation]) -> bool {
    observations
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp)
}

proptest! {
    #[test]
    fn any_ingestion_sequence_keeps_store_sorted(
        steps in prop::collection::vec(ingest_strategy(), 1..30)
    ) {
        let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
        let mut expected = 0usize;

        for step in steps {
            match step {
                Ingest::Single(t, p) => {
                    engine.add_data(t, p, 1.0).expect("append");
                    expected += 1;
                }
                Ingest::Batch(entries) => {
                    expected += entries.len();
                    engine
                        .add_data_batch(
                            entries
                                .into_iter()
                                .map(|(t, p)| BatchEntry::new(t, p, 1.0))
                                .collect(),
                        )
                        .expect("batch");
                }
            }
        }

        prop_assert_eq!(engine.len(), expected);
        prop_assert!(is_sorted(engine.observations()));
    }

    #[test]
    fn visible_slice_matches_linear_filter(
        timestamps in prop::collection::vec(-10_000i64..10_000, 0..200),
        start in -12_000i64..12_000,
        width in 0i64..10_000,
    ) {
        let mut store = TimeSeriesStore::new();
        store
            .append_batch(
                timestamps
                    .iter()
                    .map(|t| Observation::new(*t, 1.0, 1.0).expect("obs"))
                    .collect(),
            )
            .expect("batch");

        let end = start + width;
        let slice = store.visible_slice(start, end);
        let expected = store
            .observations()
            .iter()
            .filter(|o| o.timestamp >= start && o.timestamp <= end)
            .count();

        prop_assert_eq!(slice.len(), expected);
        prop_assert!(slice.iter().all(|o| o.timestamp >= start && o.timestamp <= end));
    }

    #[test]
    fn failing_batch_is_atomic(
        valid in prop::collection::vec((-1_000i64..1_000, 1.0f64..100.0), 0..20),
        bad_index in 0usize..20,
    ) {
        let mut engine = ChartEngine::new(800.0, 600.0).expect("engine init");
        engine.add_data(0, 10.0, 1.0).expect("seed");
        let before = engine.observations().to_vec();

        let mut entries: Vec<BatchEntry> =
            valid.into_iter().map(|(t, p)| BatchEntry::new(t, p, 1.0)).collect();
        let index = bad_index.min(entries.len());
        entries.insert(index, BatchEntry::new(5, f64::NAN, 1.0));

        prop_assert!(engine.add_data_batch(entries).is_err());
        prop_assert_eq!(engine.observations(), before.as_slice());
    }
}
