// Patient record and the feature order the classifier was trained on

use serde::{Deserialize, Serialize};

/// Number of numeric features the classifier consumes.
pub const FEATURE_COUNT: usize = 8;

/// A single row ready for the classifier, in `FEATURE_ORDER`.
pub type FeatureVector = [f64; FEATURE_COUNT];

/// Whether a form field accepts whole numbers only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
}

/// One column of the patient schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key on the wire.
    pub name: &'static str,
    /// Label shown by the terminal form.
    pub label: &'static str,
    pub kind: FieldKind,
}

/// The patient schema in training order.
///
/// Reordering this table silently corrupts every prediction: the model
/// artifact only sees positions, never names.
pub const PATIENT_FIELDS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec { name: "Pregnancies", label: "Pregnancies", kind: FieldKind::Integer },
    FieldSpec { name: "Glucose", label: "Glucose", kind: FieldKind::Integer },
    FieldSpec { name: "BloodPressure", label: "Blood Pressure", kind: FieldKind::Integer },
    FieldSpec { name: "SkinThickness", label: "Skin Thickness", kind: FieldKind::Integer },
    FieldSpec { name: "Insulin", label: "Insulin", kind: FieldKind::Integer },
    FieldSpec { name: "BMI", label: "BMI", kind: FieldKind::Float },
    FieldSpec { name: "DiabetesPedigreeFunction", label: "Diabetes Pedigree Function", kind: FieldKind::Float },
    FieldSpec { name: "Age", label: "Age", kind: FieldKind::Integer },
];

/// Feature names in training order, derived from `PATIENT_FIELDS`.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = {
    let mut names = [""; FEATURE_COUNT];
    let mut i = 0;
    while i < FEATURE_COUNT {
        names[i] = PATIENT_FIELDS[i].name;
        i += 1;
    }
    names
};

/// Request body of `POST /predict`. Every field is required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(rename = "Pregnancies")]
    pub pregnancies: i64,
    #[serde(rename = "Glucose")]
    pub glucose: i64,
    #[serde(rename = "BloodPressure")]
    pub blood_pressure: i64,
    #[serde(rename = "SkinThickness")]
    pub skin_thickness: i64,
    #[serde(rename = "Insulin")]
    pub insulin: i64,
    #[serde(rename = "BMI")]
    pub bmi: f64,
    #[serde(rename = "DiabetesPedigreeFunction")]
    pub diabetes_pedigree_function: f64,
    #[serde(rename = "Age")]
    pub age: i64,
}

impl PatientRecord {
    /// Flatten the record into a classifier row, in `FEATURE_ORDER`.
    pub fn to_features(&self) -> FeatureVector {
        [
            self.pregnancies as f64,
            self.glucose as f64,
            self.blood_pressure as f64,
            self.skin_thickness as f64,
            self.insulin as f64,
            self.bmi,
            self.diabetes_pedigree_function,
            self.age as f64,
        ]
    }

    /// Build a record from a row in `FEATURE_ORDER`.
    ///
    /// Integer columns are truncated; callers are expected to have checked
    /// them against `FieldKind::Integer` already.
    pub fn from_features(row: &FeatureVector) -> Self {
        Self {
            pregnancies: row[0] as i64,
            glucose: row[1] as i64,
            blood_pressure: row[2] as i64,
            skin_thickness: row[3] as i64,
            insulin: row[4] as i64,
            bmi: row[5],
            diabetes_pedigree_function: row[6],
            age: row[7] as i64,
        }
    }
}
