use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub struct BubbleRecord {
    pub id: String,
    pub label: String,
    pub value: f32,
    pub is_focal: bool,
}

impl BubbleRecord {
    pub fn new(id: impl Into<String>, label: impl Into<String>, value: f32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            is_focal: false,
        }
    }

    pub fn focal(mut self) -> Self {
        self.is_focal = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatasetError {
    DuplicateId(String),
    InvalidValue { id: String, value: f32 },
    MultipleFocal { first: String, second: String },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId(id) => write!(f, "bubble id `{id}` appears more than once"),
            Self::InvalidValue { id, value } => {
                write!(f, "bubble `{id}` has invalid value {value}; expected a finite number >= 0")
            }
            Self::MultipleFocal { first, second } => write!(
                f,
                "bubbles `{first}` and `{second}` are both marked as center; at most one is allowed"
            ),
        }
    }
}

impl std::error::Error for DatasetError {}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<BubbleRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<BubbleRecord>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(records.len());
        let mut focal: Option<&str> = None;

        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(DatasetError::DuplicateId(record.id.clone()));
            }

            if !record.value.is_finite() || record.value < 0.0 {
                return Err(DatasetError::InvalidValue {
                    id: record.id.clone(),
                    value: record.value,
                });
            }

            if record.is_focal {
                if let Some(first) = focal {
                    return Err(DatasetError::MultipleFocal {
                        first: first.to_owned(),
                        second: record.id.clone(),
                    });
                }
                focal = Some(record.id.as_str());
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[BubbleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn focal_id(&self) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.is_focal)
            .map(|record| record.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_focal_and_keeps_order() {
        let dataset = Dataset::from_records(vec![
            BubbleRecord::new("center", "Center", 65.0).focal(),
            BubbleRecord::new("1", "One", 40.0),
            BubbleRecord::new("2", "Two", 0.0),
        ])
        .unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.focal_id(), Some("center"));
        assert_eq!(dataset.records()[1].id, "1");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let error = Dataset::from_records(vec![
            BubbleRecord::new("a", "A", 1.0),
            BubbleRecord::new("a", "A again", 2.0),
        ])
        .unwrap_err();

        assert_eq!(error, DatasetError::DuplicateId("a".to_owned()));
    }

    #[test]
    fn rejects_negative_and_nan_values() {
        let negative = Dataset::from_records(vec![BubbleRecord::new("a", "A", -1.0)]);
        assert!(matches!(negative, Err(DatasetError::InvalidValue { .. })));

        let nan = Dataset::from_records(vec![BubbleRecord::new("b", "B", f32::NAN)]);
        assert!(matches!(nan, Err(DatasetError::InvalidValue { .. })));
    }

    #[test]
    fn rejects_second_focal() {
        let error = Dataset::from_records(vec![
            BubbleRecord::new("a", "A", 1.0).focal(),
            BubbleRecord::new("b", "B", 1.0),
            BubbleRecord::new("c", "C", 1.0).focal(),
        ])
        .unwrap_err();

        assert_eq!(
            error,
            DatasetError::MultipleFocal {
                first: "a".to_owned(),
                second: "c".to_owned(),
            }
        );
        assert!(error.to_string().contains("at most one"));
    }

    #[test]
    fn empty_dataset_is_valid() {
        let dataset = Dataset::from_records(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.focal_id(), None);
    }
}
