use soroban_sdk::{contracttype, Address, Symbol};

pub const STATUS_CODE_UNKNOWN: u32 = 0;
pub const STATUS_CODE_LATE_AIRLINE: u32 = 20;

/// Passengers are credited `amount * 3 / 2` when their flight is late
/// through the airline's fault.
pub const PAYOUT_NUMERATOR: i128 = 3;
pub const PAYOUT_DENOMINATOR: i128 = 2;

/// Governance record for an airline.
///
/// Airlines admitted while fewer than four are registered carry
/// `required_votes == 0`. Later nominees stay unregistered until
/// `received_votes` reaches `required_votes`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Airline {
    pub is_registered: bool,
    pub required_votes: u32,
    pub received_votes: u32,
    pub funding_amount: i128,
}

/// Composite key identifying one flight of one airline.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FlightKey {
    pub airline: Address,
    pub flight: Symbol,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Flight {
    pub is_registered: bool,
    pub status_code: u32,
    pub airline: Address,
    pub flight: Symbol,
    pub timestamp: u64,
}

impl Flight {
    /// Coverage can only be bought before the status is known.
    pub fn is_resolved(&self) -> bool {
        self.status_code != STATUS_CODE_UNKNOWN
    }
}

/// Coverage bought by one passenger for one flight.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Insurance {
    pub passenger: Address,
    pub amount: i128,
    pub paid: bool,
}

pub fn payout_for(amount: i128) -> i128 {
    amount * PAYOUT_NUMERATOR / PAYOUT_DENOMINATOR
}
