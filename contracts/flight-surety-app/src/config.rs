//! Design constants. Amounts are in base units of the 7-decimal token.

pub const UNIT: i128 = 10_000_000;

/// Airlines are admitted without votes while fewer than this many are registered.
pub const DIRECT_REGISTRATION_LIMIT: u32 = 4;

pub const MIN_AIRLINE_FUNDING: i128 = 10 * UNIT;
pub const MAX_INSURANCE_AMOUNT: i128 = UNIT;
pub const ORACLE_REGISTRATION_FEE: i128 = UNIT;

/// Distinct oracles that must agree on a status code before it is final.
pub const MIN_RESPONSES: u32 = 3;

/// Oracle indices are drawn from `0..ORACLE_INDEX_SPACE`.
pub const ORACLE_INDEX_SPACE: u32 = 10;
pub const INDEXES_PER_ORACLE: u32 = 3;

/// Insurees credited per call when a flight resolves LATE_AIRLINE. The rest
/// are reached by further `credit_insurees` calls or by passenger claims.
pub const CREDIT_BATCH_SIZE: u32 = 20;

pub const STATUS_CODE_UNKNOWN: u32 = 0;
pub const STATUS_CODE_ON_TIME: u32 = 10;
pub const STATUS_CODE_LATE_AIRLINE: u32 = 20;
pub const STATUS_CODE_LATE_WEATHER: u32 = 30;
pub const STATUS_CODE_LATE_TECHNICAL: u32 = 40;
pub const STATUS_CODE_LATE_OTHER: u32 = 50;

pub fn is_known_status_code(code: u32) -> bool {
    matches!(
        code,
        STATUS_CODE_UNKNOWN
            | STATUS_CODE_ON_TIME
            | STATUS_CODE_LATE_AIRLINE
            | STATUS_CODE_LATE_WEATHER
            | STATUS_CODE_LATE_TECHNICAL
            | STATUS_CODE_LATE_OTHER
    )
}
