use soroban_sdk::contracterror;

/// Contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOperational = 3,
    AirlineNotRegistered = 4,
    AirlineNotFunded = 5,
    AirlineAlreadyExists = 6,
    AirlineNotFound = 7,
    AirlineAlreadyRegistered = 8,
    DuplicateVote = 9,
    AwaitingConsensus = 10,
    FundingBelowMinimum = 11,
    InvalidAmount = 12,
    FlightAlreadyRegistered = 13,
    FlightNotFound = 14,
    FlightAlreadyResolved = 15,
    InsuranceCapExceeded = 16,
    InsuranceAlreadyPurchased = 17,
    NothingToWithdraw = 18,
    OracleAlreadyRegistered = 19,
    OracleNotRegistered = 20,
    RegistrationFeeTooLow = 21,
    IndexNotAssigned = 22,
    InvalidStatusCode = 23,
    RequestClosed = 24,
    DuplicateResponse = 25,
    InsufficientFees = 26,
    InsuranceNotFound = 27,
    PayoutNotQualified = 28,
    InsuranceAlreadyCredited = 29,
}

/// Coarse classification of failures for callers that only need to know
/// what went wrong, not which check tripped.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// The caller lacks the role, registration or funding required.
    Authorization,
    /// The operation collides with existing state.
    StateConflict,
    /// The system is paused or not wired up yet.
    Operational,
    /// An amount, fee or code is outside the accepted range.
    ValueConstraint,
    /// The airline, flight or policy named by the call does not exist.
    NotFound,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotInitialized | Error::NotOperational => ErrorKind::Operational,
            Error::AirlineNotRegistered
            | Error::AirlineNotFunded
            | Error::AwaitingConsensus
            | Error::OracleNotRegistered
            | Error::IndexNotAssigned => ErrorKind::Authorization,
            Error::AlreadyInitialized
            | Error::AirlineAlreadyExists
            | Error::AirlineAlreadyRegistered
            | Error::DuplicateVote
            | Error::FlightAlreadyRegistered
            | Error::FlightAlreadyResolved
            | Error::InsuranceAlreadyPurchased
            | Error::NothingToWithdraw
            | Error::OracleAlreadyRegistered
            | Error::RequestClosed
            | Error::DuplicateResponse
            | Error::PayoutNotQualified
            | Error::InsuranceAlreadyCredited => ErrorKind::StateConflict,
            Error::AirlineNotFound | Error::FlightNotFound | Error::InsuranceNotFound => {
                ErrorKind::NotFound
            }
            Error::FundingBelowMinimum
            | Error::InvalidAmount
            | Error::InsuranceCapExceeded
            | Error::RegistrationFeeTooLow
            | Error::InvalidStatusCode
            | Error::InsufficientFees => ErrorKind::ValueConstraint,
        }
    }
}
