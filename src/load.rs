use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::{ClusteringError, Result};

/// Reads a dataset file: `n d` followed by `n * d` whitespace-separated reals.
pub fn load_dataset(filepath: &Path) -> Result<Dataset> {
    let contents = fs::read_to_string(filepath).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ClusteringError::FileNotFound(filepath.to_path_buf()),
        _ => ClusteringError::Io {
            path: filepath.to_path_buf(),
            source,
        },
    })?;

    let dataset = parse_dataset(&contents)?;
    log::info!(
        "Loaded {} points of dimension {} from {}",
        dataset.len(),
        dataset.dimension(),
        filepath.display()
    );
    Ok(dataset)
}

pub fn parse_dataset(contents: &str) -> Result<Dataset> {
    let mut tokens = contents.split_whitespace().enumerate();

    let num_points = parse_count(tokens.next(), 0, "point count")?;
    let dimension = parse_count(tokens.next(), 1, "dimension")?;
    if num_points == 0 || dimension == 0 {
        return Err(ClusteringError::EmptyDataset);
    }

    let expected = num_points
        .checked_mul(dimension)
        .ok_or_else(|| ClusteringError::Parse {
            position: 1,
            token: dimension.to_string(),
            reason: format!("{} points of dimension {} overflow the value count", num_points, dimension),
        })?;
    let mut values = Vec::new();
    for (position, token) in tokens.by_ref().take(expected) {
        let value: f64 = token.parse().map_err(|err: std::num::ParseFloatError| {
            ClusteringError::Parse {
                position,
                token: token.to_string(),
                reason: err.to_string(),
            }
        })?;
        if !value.is_finite() {
            return Err(ClusteringError::Parse {
                position,
                token: token.to_string(),
                reason: "value is not finite".to_string(),
            });
        }
        values.push(value);
    }

    if values.len() < expected {
        return Err(ClusteringError::Truncated {
            expected,
            found: values.len(),
        });
    }

    let trailing = tokens.count();
    if trailing > 0 {
        log::warn!("Ignoring {} tokens after the declared {} values", trailing, expected);
    }

    let points = values
        .chunks(dimension)
        .map(<[f64]>::to_vec)
        .collect();
    Dataset::from_points(points)
}

fn parse_count(token: Option<(usize, &str)>, header_index: usize, what: &str) -> Result<usize> {
    let (position, token) = token.ok_or(ClusteringError::Truncated {
        expected: 2,
        found: header_index,
    })?;
    token.parse().map_err(|err: std::num::ParseIntError| ClusteringError::Parse {
        position,
        token: token.to_string(),
        reason: format!("invalid {}: {}", what, err),
    })
}
