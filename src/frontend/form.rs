// Terminal input form for a patient record

use std::io::{self, BufRead, Write};

use diabetes_types::{FieldKind, FieldSpec, PatientRecord, FEATURE_COUNT, PATIENT_FIELDS};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must be a whole number")]
    NotAnInteger(&'static str),
    #[error("{0} must be 0 or greater")]
    Negative(&'static str),
    #[error("{0} is too large")]
    TooLarge(&'static str),
}

/// Parse one answer. Blank input means 0, like an untouched number widget.
pub fn parse_field(spec: &FieldSpec, input: &str) -> Result<f64, FieldError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }
    let value: f64 = input
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or(FieldError::NotANumber(spec.label))?;
    if value < 0.0 {
        return Err(FieldError::Negative(spec.label));
    }
    if spec.kind == FieldKind::Integer {
        if value.fract() != 0.0 {
            return Err(FieldError::NotAnInteger(spec.label));
        }
        // i64::MAX rounds up to 2^63 as f64, so equality already overflows
        if value >= i64::MAX as f64 {
            return Err(FieldError::TooLarge(spec.label));
        }
    }
    Ok(value)
}

/// Prompt for every field in training order, asking again after bad input.
pub fn collect_record<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<PatientRecord> {
    let mut row = [0.0; FEATURE_COUNT];
    for (slot, spec) in row.iter_mut().zip(PATIENT_FIELDS.iter()) {
        *slot = prompt_field(spec, input, output)?;
    }
    Ok(PatientRecord::from_features(&row))
}

fn prompt_field<R: BufRead, W: Write>(spec: &FieldSpec, input: &mut R, output: &mut W) -> io::Result<f64> {
    loop {
        write!(output, "{}: ", spec.label)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("input ended before {} was entered", spec.label),
            ));
        }
        match parse_field(spec, &line) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "  {e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GLUCOSE: FieldSpec = PATIENT_FIELDS[1];
    const BMI: FieldSpec = PATIENT_FIELDS[5];

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field(&GLUCOSE, " 148 \n"), Ok(148.0));
        assert_eq!(parse_field(&BMI, "33.6"), Ok(33.6));
        assert_eq!(parse_field(&BMI, ""), Ok(0.0));
        assert_eq!(parse_field(&GLUCOSE, "14.5"), Err(FieldError::NotAnInteger("Glucose")));
        assert_eq!(parse_field(&BMI, "-1"), Err(FieldError::Negative("BMI")));
        assert_eq!(parse_field(&BMI, "abc"), Err(FieldError::NotANumber("BMI")));
        assert_eq!(parse_field(&BMI, "NaN"), Err(FieldError::NotANumber("BMI")));
    }

    #[test]
    fn test_integer_field_out_of_range() {
        assert_eq!(parse_field(&GLUCOSE, "1e30"), Err(FieldError::TooLarge("Glucose")));
        assert_eq!(parse_field(&GLUCOSE, "9223372036854775807"), Err(FieldError::TooLarge("Glucose")));
        assert_eq!(parse_field(&GLUCOSE, "1e15"), Ok(1e15));
        // float fields go through untouched
        assert_eq!(parse_field(&BMI, "1e30"), Ok(1e30));
    }

    #[test]
    fn test_collect_record_reprompts() {
        let mut input = io::Cursor::new("6\nx\n148\n72\n35\n0\n33.6\n0.627\n50\n");
        let mut output = Vec::new();
        let record = collect_record(&mut input, &mut output).unwrap();

        assert_eq!(record.pregnancies, 6);
        assert_eq!(record.glucose, 148);
        assert_eq!(record.bmi, 33.6);
        assert_eq!(record.age, 50);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Glucose must be a number"));
        assert!(shown.contains("Diabetes Pedigree Function: "));
    }

    #[test]
    fn test_collect_record_eof() {
        let mut input = io::Cursor::new("6\n148\n");
        let err = collect_record(&mut input, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
