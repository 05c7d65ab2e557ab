//! CIFAR-10 binary batch reader
//!
//! The binary distribution stores each image as a 3073-byte record:
//! one label byte in [0, 10) followed by 3072 pixel bytes, the red, green and
//! blue 32×32 planes in row-major order. Training data is split across
//! `data_batch_1.bin` … `data_batch_5.bin`; the test split is `test_batch.bin`.

use crate::core::{LabeledDataset, LossError, Matrix, Result};
use log::{info, trace};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Image side length
pub const IMAGE_SIZE: usize = 32;
/// Colour channels per image
pub const CHANNELS: usize = 3;
/// Flattened feature count of one image
pub const IMAGE_FEATURES: usize = IMAGE_SIZE * IMAGE_SIZE * CHANNELS;
/// Number of CIFAR-10 classes
pub const N_CLASSES: usize = 10;

const RECORD_SIZE: usize = 1 + IMAGE_FEATURES;
const TRAIN_BATCHES: [&str; 5] = [
    "data_batch_1.bin",
    "data_batch_2.bin",
    "data_batch_3.bin",
    "data_batch_4.bin",
    "data_batch_5.bin",
];
const TEST_BATCH: &str = "test_batch.bin";

/// Loader for the CIFAR-10 binary distribution
pub struct Cifar10;

impl Cifar10 {
    /// Load the training and test splits from a `cifar-10-batches-bin` directory
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<(LabeledDataset, LabeledDataset)> {
        let dir = dir.as_ref();
        let batch_paths: Vec<_> = TRAIN_BATCHES.iter().map(|name| dir.join(name)).collect();
        let train = Self::read_batch_files(&batch_paths)?;
        let test = Self::read_batch_file(dir.join(TEST_BATCH))?;

        info!(
            "Loaded CIFAR-10 from {:?}: {} training images, {} test images",
            dir,
            train.labels.len(),
            test.labels.len()
        );
        Ok((train, test))
    }

    /// Read one batch file
    pub fn read_batch_file<P: AsRef<Path>>(path: P) -> Result<LabeledDataset> {
        let path = path.as_ref();
        trace!("Reading CIFAR-10 batch {:?}", path);
        let file = File::open(path)?;
        Self::read_batch(BufReader::new(file))
    }

    /// Read several batch files and stack them into one dataset
    pub fn read_batch_files<P: AsRef<Path>>(paths: &[P]) -> Result<LabeledDataset> {
        let mut pixels = Vec::new();
        let mut labels = Vec::new();

        for path in paths {
            let file = File::open(path.as_ref())?;
            trace!("Reading CIFAR-10 batch {:?}", path.as_ref());
            read_records(BufReader::new(file), &mut pixels, &mut labels)?;
        }

        into_dataset(pixels, labels)
    }

    /// Parse a batch of records from any reader
    pub fn read_batch<R: Read>(reader: R) -> Result<LabeledDataset> {
        let mut pixels = Vec::new();
        let mut labels = Vec::new();
        read_records(reader, &mut pixels, &mut labels)?;
        into_dataset(pixels, labels)
    }
}

fn into_dataset(pixels: Vec<f64>, labels: Vec<usize>) -> Result<LabeledDataset> {
    if labels.is_empty() {
        return Err(LossError::EmptyDataset);
    }
    let features = Matrix::new(labels.len(), IMAGE_FEATURES, pixels)?;
    LabeledDataset::new(features, labels)
}

fn read_records<R: Read>(
    mut reader: R,
    pixels: &mut Vec<f64>,
    labels: &mut Vec<usize>,
) -> Result<()> {
    let mut record = vec![0u8; RECORD_SIZE];

    loop {
        let filled = fill_record(&mut reader, &mut record)?;
        if filled == 0 {
            return Ok(());
        }
        if filled < RECORD_SIZE {
            return Err(LossError::Parse(format!(
                "Truncated CIFAR-10 record {}: {} of {} bytes",
                labels.len(),
                filled,
                RECORD_SIZE
            )));
        }

        let label = usize::from(record[0]);
        if label >= N_CLASSES {
            return Err(LossError::Parse(format!(
                "Invalid CIFAR-10 label {} in record {}",
                label,
                labels.len()
            )));
        }

        labels.push(label);
        pixels.extend(record[1..].iter().map(|&b| f64::from(b)));
    }
}

/// Read until the buffer is full or the stream ends; returns the byte count
fn fill_record<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
