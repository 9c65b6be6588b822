use std::collections::HashMap;

use proptest::prelude::*;
use checkflow::clock::Timestamp;
use checkflow::engine::{SimCore, SimEvent, SimOptions};
use checkflow::types::Phase;
use checkflow_test_utils::builders::ConfigFileBuilder;

#[derive(Debug, Clone, Copy)]
enum Step {
    Tick,
    Engine,
}

// Each step moves the clock forward by a random amount before firing.
fn steps_strategy(max_len: usize) -> impl Strategy<Value = Vec<(Step, u64)>> {
    proptest::collection::vec(
        (
            prop_oneof![1 => Just(Step::Tick), 4 => Just(Step::Engine)],
            0..4_000u64,
        ),
        1..max_len,
    )
}

proptest! {
    #[test]
    fn counters_balance_and_phases_never_regress(
        seed in any::<u64>(),
        probability in 0.0..=1.0f64,
        steps in steps_strategy(200),
    ) {
        let cfg = ConfigFileBuilder::new()
            .seed(seed)
            .success_probability(probability)
            .build();
        let mut core = SimCore::new(&cfg, SimOptions::default());
        core.step(SimEvent::Start, Timestamp::ZERO);
        let first_seq = core.generator().next_seq();

        let mut now = 0u64;
        let mut last_phase: HashMap<u64, Phase> = HashMap::new();

        for (step, delta) in steps {
            now += delta;
            let event = match step {
                Step::Tick => SimEvent::GenerationTick,
                Step::Engine => SimEvent::EngineStep,
            };
            core.step(event, Timestamp::from_millis(now));

            let stats = core.stats();
            prop_assert_eq!(stats.total(), stats.success() + stats.failed());

            let created = core.generator().next_seq() - first_seq;
            prop_assert_eq!(created, core.jobs().len() as u64 + stats.total());

            for job in core.jobs().iter() {
                let id = job.id().0;
                if let Some(previous) = last_phase.get(&id) {
                    prop_assert!(job.phase() >= *previous, "job {} went {:?} -> {:?}", id, previous, job.phase());
                }
                prop_assert!(job.phase() != Phase::Complete);
                last_phase.insert(id, job.phase());
            }
        }
    }
}
