/// Errors that can occur while streaming message bits.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A bit was requested after the last bit of the message was consumed.
    #[error("message reading has finished ({len} bytes consumed)")]
    ReadExhausted { len: usize },

    /// A bit was written after the message buffer was filled.
    #[error("message writing has finished ({len} bytes filled)")]
    WriteExhausted { len: usize },

    /// The payload length does not fit the 32-bit length prefix.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
