// Held-out test set loaded from CSV

use std::path::Path;

use diabetes_types::{FeatureVector, FEATURE_COUNT};

use super::MetricsError;

/// Feature rows with their 0/1 labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSet {
    pub features: Vec<FeatureVector>,
    pub labels: Vec<u8>,
}

impl TestSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn parse_cell(cell: &str, line: u64, column: usize) -> Result<f64, MetricsError> {
    cell.trim().parse::<f64>().map_err(|_| {
        MetricsError::InvalidTestSet(format!("line {line}, column {column}: {cell:?} is not a number"))
    })
}

/// Load a CSV with a header row, eight feature columns in training order
/// and a trailing 0/1 label column.
pub fn load_test_set(path: &Path) -> Result<TestSet, MetricsError> {
    let file = std::fs::File::open(path).map_err(|source| MetricsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);

    let mut set = TestSet::default();
    for record in reader.records() {
        let record = record.map_err(|source| MetricsError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        if record.len() != FEATURE_COUNT + 1 {
            return Err(MetricsError::InvalidTestSet(format!(
                "line {line}: expected {} columns, got {}",
                FEATURE_COUNT + 1,
                record.len()
            )));
        }

        let mut row = [0.0; FEATURE_COUNT];
        for (column, cell) in record.iter().take(FEATURE_COUNT).enumerate() {
            row[column] = parse_cell(cell, line, column)?;
        }
        let label = match parse_cell(&record[FEATURE_COUNT], line, FEATURE_COUNT)? {
            l if l == 0.0 => 0,
            l if l == 1.0 => 1,
            other => {
                return Err(MetricsError::InvalidTestSet(format!(
                    "line {line}: label {other} is not 0 or 1"
                )))
            }
        };

        set.features.push(row);
        set.labels.push(label);
    }

    if set.is_empty() {
        return Err(MetricsError::InvalidTestSet("test set has no rows".to_string()));
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DiabetesPedigreeFunction,Age,Outcome\n";

    fn write_temp(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("diabetes-test-{}.csv", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_rows_and_labels() {
        let path = write_temp(&format!(
            "{HEADER}6,148,72,35,0,33.6,0.627,50,1\n1,85,66,29,0,26.6,0.351,31,0.0\n"
        ));
        let set = load_test_set(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(set.len(), 2);
        assert_eq!(set.labels, vec![1, 0]);
        assert_eq!(set.features[0], [6.0, 148.0, 72.0, 35.0, 0.0, 33.6, 0.627, 50.0]);
    }

    #[test]
    fn test_missing_file() {
        let err = load_test_set(Path::new("/nonexistent/diabetes_test.csv")).unwrap_err();
        assert!(matches!(err, MetricsError::Open { .. }));
    }

    #[test]
    fn test_header_only_is_empty() {
        let path = write_temp(HEADER);
        let err = load_test_set(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, MetricsError::InvalidTestSet(_)));
    }

    #[test]
    fn test_non_binary_label_rejected() {
        let path = write_temp(&format!("{HEADER}6,148,72,35,0,33.6,0.627,50,2\n"));
        let err = load_test_set(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("not 0 or 1"));
    }

    #[test]
    fn test_wrong_width_rejected() {
        let path = write_temp("a,b,c\n1,2,3\n");
        let err = load_test_set(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, MetricsError::InvalidTestSet(_)));
    }
}
