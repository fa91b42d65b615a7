//! CSV export of training and test sets.
//!
//! Both files carry a header row. Feature columns are named `x0..x{d-1}`.

use std::path::Path;

use basket_pricing::dataset::{TestSet, TrainingSet};
use tracing::info;

use crate::Result;

/// Training set file name inside the export directory
pub const TRAIN_FILE: &str = "train.csv";
/// Test set file name inside the export directory
pub const TEST_FILE: &str = "test.csv";

fn feature_headers(d: usize) -> Vec<String> {
    (0..d).map(|j| format!("x{}", j)).collect()
}

/// Write `x0..x{d-1}, y` rows
pub fn write_training_csv(path: &Path, training: &TrainingSet) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = feature_headers(training.x().cols());
    header.push("y".to_string());
    writer.write_record(&header)?;

    for (row, y) in training.x().row_iter().zip(training.y()) {
        let record: Vec<String> = row
            .iter()
            .chain(std::iter::once(y))
            .map(|v| v.to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `x0..x{d-1}, basket, label` rows
pub fn write_test_csv(path: &Path, test: &TestSet) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = feature_headers(test.x().cols());
    header.push("basket".to_string());
    header.push("label".to_string());
    writer.write_record(&header)?;

    for ((row, basket), label) in test
        .x()
        .row_iter()
        .zip(test.basket_values())
        .zip(test.labels())
    {
        let record: Vec<String> = row
            .iter()
            .chain([basket, label])
            .map(|v| v.to_string())
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write both files into `dir`, creating it if needed
pub fn export_datasets(dir: &Path, training: &TrainingSet, test: &TestSet) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let train_path = dir.join(TRAIN_FILE);
    let test_path = dir.join(TEST_FILE);
    write_training_csv(&train_path, training)?;
    write_test_csv(&test_path, test)?;
    info!(
        train = %train_path.display(),
        test = %test_path.display(),
        "exported data sets"
    );
    Ok(())
}
