use std::thread;
use std::time::Instant;

use pickme::Random;
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::oneshot;

const COUNT: usize = 256;
const ITERATIONS: usize = 100;

pub fn main() {
    env_logger::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .build()
        .expect("failed to construct runtime");

    let scenarios = build_scenarios();

    let start = Instant::now();

    runtime.block_on(async {
        for (n, scenario) in scenarios.iter().enumerate() {
            let (polls, triggers) = scenario.build();
            let wanted = scenario.wanted;

            let picker = tokio::spawn(async move {
                if n % 2 == 0 {
                    pickme::pick(polls, |v| *v == wanted).await
                } else {
                    pickme::pick(polls, |v| *v == wanted)
                        .with_bias(Random::new())
                        .await
                }
            });

            let t = thread::spawn(move || {
                for (index, tx) in triggers {
                    // Every third candidate fails by having its sender dropped.
                    if index % 3 != 0 || index == wanted {
                        let _ = tx.send(index);
                    }
                }
            });

            let output = picker.await.expect("pick task panicked");
            t.join().expect("trigger thread panicked");
            assert_eq!(output, Ok(wanted));
        }
    });

    println!("{:?}", Instant::now().duration_since(start));
}

struct Scenario {
    /// Order in which candidates are completed.
    timings: Vec<usize>,
    /// The value being picked.
    wanted: usize,
}

impl Scenario {
    /// Setup the current scenario.
    fn build(&self) -> (Vec<oneshot::Receiver<usize>>, Vec<(usize, oneshot::Sender<usize>)>) {
        let mut polls = Vec::with_capacity(COUNT);
        let mut senders = Vec::with_capacity(COUNT);

        for _ in 0..COUNT {
            let (tx, rx) = oneshot::channel();
            polls.push(rx);
            senders.push(Some(tx));
        }

        let triggers = self
            .timings
            .iter()
            .filter_map(|index| Some((*index, senders[*index].take()?)))
            .collect();

        (polls, triggers)
    }
}

fn build_scenarios() -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    let mut rng = StdRng::seed_from_u64(0x0DDB1A5E5BAD5EEDu64);

    for _ in 0..ITERATIONS {
        let mut source = (0..COUNT).map(|n| (rng.gen::<u32>(), n)).collect::<Vec<_>>();
        source.sort_by_key(|t| t.0);

        scenarios.push(Scenario {
            timings: source.into_iter().map(|(_, n)| n).collect(),
            wanted: rng.gen_range(0..COUNT),
        });
    }

    scenarios
}
