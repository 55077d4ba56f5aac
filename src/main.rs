use cpakit::cpa::recover_key_with;
use cpakit::error::Error;
use cpakit::leakage_model::{aes, Sbox};
use cpakit::loader::read_json_dataset;
use std::{env, time::Instant};

fn main() -> Result<(), Error> {
    let path = env::args().nth(1).unwrap_or_else(|| "traces.json".into());

    let start = Instant::now();
    let dataset = read_json_dataset(&path)?;
    println!(
        "{}: {} traces of {} samples",
        path,
        dataset.num_traces(),
        dataset.num_samples()
    );

    let sbox = Sbox::from(aes::SBOX);

    #[cfg(feature = "progress_bar")]
    let bar = cpakit::util::progress_bar(cpakit::dataset::BLOCK_SIZE);

    let recovered = recover_key_with(&dataset, &sbox, |byte_index, byte| {
        println!(
            "byte {byte_index:2}: 0x{:02x} (corr {:.2})",
            byte.value, byte.score
        );
        #[cfg(feature = "progress_bar")]
        bar.inc(1);
    });

    #[cfg(feature = "progress_bar")]
    bar.finish();

    println!("recovered key: {}", hex::encode(recovered.key()));
    println!("elapsed: {:.2?}", start.elapsed());

    Ok(())
}
