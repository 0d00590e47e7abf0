use thiserror::Error;

/// Input validation failures.  Reported inline to the user; the offending
/// form is retained and no state is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One of the required registration fields is empty.
    #[error("Please fill all required fields")]
    MissingRequiredFields,

    /// Login submitted without an employee id or password.
    #[error("Please enter both Employee ID and Password")]
    MissingCredentials,

    /// Registration submitted before a face image was captured.
    #[error("Please capture your face first")]
    FaceNotCaptured,

    /// A non-empty aadhaar number that is not exactly 12 digits.
    #[error("Aadhaar number must be 12 digits")]
    InvalidAadhaar,
}
