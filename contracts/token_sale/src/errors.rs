use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    NotOwner = 3,
    InvalidWindow = 4,
    SalePaused = 5,
    SaleTypeMismatch = 6,
    SaleWindowClosed = 7,
    InvalidAmount = 8,
    InvalidPackageAmount = 9,
    InvalidInputAmount = 10,
    UnsupportedToken = 11,
    InsufficientNativeValue = 12,
    InsufficientTokenBalance = 13,
    InsufficientAllowance = 14,
    ArrayLengthMismatch = 15,
}
