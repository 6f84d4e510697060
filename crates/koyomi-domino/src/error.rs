use thiserror::Error;

/// Errors from the Domino bridge.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The international settings carry zero or several date-order flags.
    #[error(
        "international settings must select exactly one date order (ymd={ymd}, dmy={dmy}, mdy={mdy})"
    )]
    MalformedLocaleConfiguration { ymd: bool, dmy: bool, mdy: bool },

    /// A Notes time zone field with no known zone mapping.
    #[error("no zone identifier mapping for Notes time zone {0:?}")]
    UnresolvableZoneLabel(String),

    /// A text rendering did not match the locale-derived pattern, either
    /// because the settings drifted from the value's actual format or
    /// because the rendering lacks its trailing zone token.
    #[error("cannot parse {text:?} with pattern {pattern:?}")]
    TextParse {
        text: String,
        pattern: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// The difference between the two renderings is not a valid UTC
    /// offset, which means they describe different instants.
    #[error("reconstructed zone offset of {minutes} minutes is out of range")]
    OffsetOutOfRange { minutes: i64 },

    #[error(transparent)]
    Convert(#[from] koyomi_core::ConvertError),

    /// Failure reported by the session or one of its values.
    #[error("session error: {0}")]
    Session(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
