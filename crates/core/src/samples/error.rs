use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error(
        "sample lists differ in length: {subjects} subjects, {hicns} HICNs, {mbis} MBIs"
    )]
    LengthMismatch {
        subjects: usize,
        hicns: usize,
        mbis: usize,
    },

    #[error("invalid sample users CSV: {0}")]
    Csv(String),
}
