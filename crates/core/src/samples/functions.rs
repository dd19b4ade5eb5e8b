use super::{SampleBeneficiary, SampleError, SampleUser};

/// Split a comma-separated list, trimming each entry.
///
/// A blank input is an empty list. Blank entries inside a non-blank list are
/// kept so positions stay aligned with the other lists.
pub fn parse_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    raw.split(',').map(|entry| entry.trim().to_string()).collect()
}

/// Zip parallel subject/HICN/MBI lists into sample beneficiaries.
///
/// All three lists must have the same length.
pub fn zip_samples(
    subjects: Vec<String>,
    hicns: Vec<String>,
    mbis: Vec<String>,
) -> Result<Vec<SampleBeneficiary>, SampleError> {
    if subjects.len() != hicns.len() || subjects.len() != mbis.len() {
        return Err(SampleError::LengthMismatch {
            subjects: subjects.len(),
            hicns: hicns.len(),
            mbis: mbis.len(),
        });
    }

    Ok(subjects
        .into_iter()
        .zip(hicns)
        .zip(mbis)
        .map(|((subject, hicn), mbi)| SampleBeneficiary { subject, hicn, mbi })
        .collect())
}

/// Parse a sample users CSV with a header row.
///
/// Values are trimmed and unknown columns ignored. Any malformed row fails
/// the whole document.
pub fn parse_users_csv(raw: &str) -> Result<Vec<SampleUser>, SampleError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes())
        .deserialize()
        .collect::<Result<Vec<SampleUser>, csv::Error>>()
        .map_err(|e| SampleError::Csv(e.to_string()))
}
