//! Error types and handling for the meetup finder

use thiserror::Error;

/// Main error type for the meetup finder
#[derive(Error, Debug)]
pub enum MeetupError {
    /// An operation was given input outside its domain (empty point set,
    /// out-of-range coordinates, blank user input)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// An entry with the same label is already being planned around
    #[error("Duplicate entry: {label}")]
    DuplicateEntry { label: String },

    /// A venue search was requested before any entry was added
    #[error("No meetup center: add at least one address first")]
    NoMeetupCenter,

    /// The geocoder returned no result for a query
    #[error("Location not found: {query}")]
    LocationNotFound { query: String },

    /// The places search returned no venue for a query
    #[error("No venues found for '{query}'")]
    NoVenuesFound { query: String },

    /// Geocoding or places API errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl MeetupError {
    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new duplicate entry error
    pub fn duplicate<S: Into<String>>(label: S) -> Self {
        Self::DuplicateEntry {
            label: label.into(),
        }
    }

    /// Create a new location not found error
    pub fn location_not_found<S: Into<String>>(query: S) -> Self {
        Self::LocationNotFound {
            query: query.into(),
        }
    }

    /// Create a new no venues found error
    pub fn no_venues<S: Into<String>>(query: S) -> Self {
        Self::NoVenuesFound {
            query: query.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            MeetupError::InvalidInput { message } => format!("Invalid input: {message}"),
            MeetupError::DuplicateEntry { .. } => "Address already in list!".to_string(),
            MeetupError::NoMeetupCenter => {
                "No meetup center found. Please add an address first.".to_string()
            }
            MeetupError::LocationNotFound { query } => {
                format!("Could not find a location for '{query}'.")
            }
            MeetupError::NoVenuesFound { query } => {
                format!("No {query} found near your meetup center.")
            }
            MeetupError::Api { .. } => {
                "Unable to reach the maps service. Please check your connection and API key."
                    .to_string()
            }
            MeetupError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
        }
    }
}
