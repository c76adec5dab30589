use anchor_lang::prelude::*;

/// Custom error codes for the vesting pool program.
#[error_code]
pub enum VestingError {
    // Authorization.
    #[msg("Can only be claimed by vesting owner")]
    NotOwner,

    #[msg("Can only be called by pool manager")]
    NotManager,

    #[msg("Only managed vestings can be paused or cancelled")]
    NotManaged,

    // State preconditions.
    #[msg("State root already initialized")]
    AlreadyInitialized,

    #[msg("State root not initialized")]
    RootNotInitialized,

    #[msg("Vesting already paused")]
    AlreadyPaused,

    #[msg("Vesting already cancelled")]
    AlreadyCancelled,

    #[msg("Vesting is not paused")]
    NotPaused,

    #[msg("Vesting has been cancelled and cannot be unpaused")]
    CancelledCannotUnpause,

    #[msg("Vesting has already been redeemed")]
    AlreadyRedeemed,

    #[msg("Deadline to redeem vesting has been exceeded")]
    DeadlineExceeded,

    #[msg("Tokens can still be redeemed")]
    StillRedeemable,

    #[msg("No tokens to claim")]
    NothingToClaim,

    #[msg("Vesting not active yet")]
    NotYetActive,

    #[msg("Vesting not found")]
    VestingNotFound,

    #[msg("Vesting id already used")]
    VestingIdAlreadyUsed,

    #[msg("This method is not available for this pool")]
    NotAvailable,

    // Arithmetic and integrity.
    #[msg("Invalid vesting curve")]
    InvalidCurve,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Invalid merkle proof")]
    InvalidProof,

    #[msg("Merkle proof too long")]
    ProofTooLong,

    #[msg("Element not found in merkle tree")]
    ElementNotFound,

    #[msg("Merkle tree needs at least one leaf")]
    EmptyTree,

    #[msg("Duplicate merkle leaf")]
    DuplicateLeaf,

    #[msg("Not enough tokens available")]
    InsufficientBalance,

    #[msg("Trying to claim too many tokens")]
    ExceedsVested,

    #[msg("Cannot claim to 0-address")]
    ZeroBeneficiary,

    #[msg("Invalid vesting account")]
    InvalidAccount,

    #[msg("Invalid amount")]
    InvalidAmount,

    #[msg("Grant hash does not match the vesting account")]
    GrantHashMismatch,

    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Token transfer failed")]
    TokenTransferFailed,
}

/// `require!` for core code returning `Result<_, VestingError>` instead of the
/// anchor error type.
#[macro_export]
macro_rules! ensure {
    ($invariant:expr, $error:expr $(,)?) => {
        if !($invariant) {
            return Err($error);
        }
    };
}
