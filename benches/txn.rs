use anyhow::Result;
use divan::{Bencher, black_box};
use rand::{
    SeedableRng,
    distr::{Alphabetic, SampleString},
    prelude::*,
};
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

use boltwrap::{Client, Config, integer_to_bytes};

const DEFAULT_SEED: u64 = 1;
const BUCKET: &str = "bench";
const MAX_VALUE_SIZE: usize = 1000;

fn main() {
    divan::main()
}

fn new_test_client() -> (Client, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let mut client = Client::new(Config {
        dir: dir.path().to_path_buf(),
        ..Config::new()
    });
    client.open().unwrap();
    (client, dir)
}

struct Seeder {
    n: usize,
    rng: ChaCha8Rng,
}

impl Seeder {
    fn new(n: usize, seed: u64) -> Self {
        Seeder {
            n,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn seed(self, client: &Client) -> Result<()> {
        client.write_transaction(|tx| -> Result<()> {
            let b = tx.get_or_create_bucket(BUCKET)?;
            for (i, v) in self.enumerate() {
                b.put(integer_to_bytes(i as u64).to_vec(), v)?;
            }
            Ok(())
        })
    }
}

impl Iterator for Seeder {
    type Item = String;
    fn next(&mut self) -> Option<Self::Item> {
        if self.n == 0 {
            return None;
        }
        self.n -= 1;
        let val_len = self.rng.random_range(1..=MAX_VALUE_SIZE);
        Some(Alphabetic.sample_string(&mut self.rng, val_len))
    }
}

#[divan::bench(args = [1000, 4000, 10000])]
fn bench_write_transaction(b: Bencher, n: usize) {
    let (client, _dir) = new_test_client();
    b.counter(n).bench_local(|| {
        Seeder::new(n, DEFAULT_SEED).seed(&client).unwrap();
    });
}

#[divan::bench(args = [1000, 4000, 10000])]
fn bench_read_transaction(b: Bencher, n: usize) {
    let (client, _dir) = new_test_client();
    Seeder::new(n, DEFAULT_SEED).seed(&client).unwrap();
    b.counter(n).bench_local(|| {
        client
            .read_transaction(|tx| -> Result<()> {
                let bucket = tx.get_bucket(BUCKET)?;
                for i in 0..n as u64 {
                    black_box(bucket.get(integer_to_bytes(i).to_vec()));
                }
                Ok(())
            })
            .unwrap();
    });
}
