use soroban_sdk::contracterror;

/// Contract errors
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOperational = 3,
    CallerNotAuthorized = 4,
    CallerAlreadyAuthorized = 5,
    AirlineAlreadyExists = 6,
    AirlineNotFound = 7,
    AirlineNotRegistered = 8,
    AirlineAlreadyRegistered = 9,
    DuplicateVote = 10,
    FlightAlreadyRegistered = 11,
    FlightNotFound = 12,
    FlightAlreadyResolved = 13,
    InsuranceAlreadyPurchased = 14,
    PayoutNotQualified = 15,
    NoCredit = 16,
    InvalidAmount = 17,
    InsuranceNotFound = 18,
}
