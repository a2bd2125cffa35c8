use agsol_common::SignerPdaError;
#[cfg(feature = "test-bpf")]
use num_derive::FromPrimitive;
use solana_program::program_error::ProgramError;
use thiserror::Error;

/// Coarse classification of [`AuctionContractError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed auction parameters, the auction never becomes usable.
    Config,
    /// Invalid query arguments.
    Validation,
    /// The requested quantity cannot be issued.
    Supply,
    /// The attached payment does not cover the cost.
    Payment,
    /// Account, seed or instruction level problems of the on-chain program.
    Account,
    /// A checked arithmetic operation failed.
    Arithmetic,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "test-bpf", derive(FromPrimitive))]
pub enum AuctionContractError {
    #[error("invalid instruction")]
    InvalidInstruction = 500,
    #[error("auction already initialized")]
    AuctionAlreadyInitialized = 501,
    #[error("invalid seeds")]
    InvalidSeeds = 502,
    #[error("invalid program address")]
    InvalidProgramAddress = 503,
    #[error("invalid account owner")]
    InvalidAccountOwner = 504,
    #[error("arithmetic error")]
    ArithmeticError = 505,
    #[error("collection size must be > 0")]
    InvalidCollectionSize = 506,
    #[error("duration must be > 0")]
    InvalidDuration = 507,
    #[error("step duration must be > 0 and must not exceed the duration")]
    InvalidStepDuration = 508,
    #[error("floor price must be > 0 and <= start price")]
    InvalidPriceRange = 509,
    #[error("price delta must be > 0")]
    InvalidPriceDelta = 510,
    #[error("prevStep must be > 0")]
    PrevStepIsZero = 511,
    #[error("currStep must be >= prevStep")]
    CurrStepBeforePrevStep = 512,
    #[error("currentStep must be >= prevStep")]
    PrevStepNotSettled = 513,
    #[error("no price was recorded at prevStep")]
    StepNotRecorded = 514,
    #[error("mint quantity must be > 0")]
    ZeroMintQuantity = 515,
    #[error("will exceed maximum supply")]
    ExceedsMaxSupply = 516,
    #[error("insufficient payment")]
    InsufficientPayment = 517,
    #[error("clock reading cannot be represented")]
    InvalidClockReading = 518,
    #[error("step state account does not belong to the observed step")]
    StepStateMismatch = 519,
    #[error("ownership registry failed to mint")]
    MintFailed = 520,
}

impl AuctionContractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCollectionSize
            | Self::InvalidDuration
            | Self::InvalidStepDuration
            | Self::InvalidPriceRange
            | Self::InvalidPriceDelta => ErrorKind::Config,
            Self::PrevStepIsZero
            | Self::CurrStepBeforePrevStep
            | Self::PrevStepNotSettled
            | Self::StepNotRecorded
            | Self::InvalidClockReading => ErrorKind::Validation,
            Self::ZeroMintQuantity | Self::ExceedsMaxSupply | Self::MintFailed => {
                ErrorKind::Supply
            }
            Self::InsufficientPayment => ErrorKind::Payment,
            Self::ArithmeticError => ErrorKind::Arithmetic,
            Self::InvalidInstruction
            | Self::AuctionAlreadyInitialized
            | Self::InvalidSeeds
            | Self::InvalidProgramAddress
            | Self::InvalidAccountOwner
            | Self::StepStateMismatch => ErrorKind::Account,
        }
    }
}

impl From<AuctionContractError> for ProgramError {
    fn from(e: AuctionContractError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

impl From<SignerPdaError> for AuctionContractError {
    fn from(_: SignerPdaError) -> Self {
        AuctionContractError::InvalidSeeds
    }
}
