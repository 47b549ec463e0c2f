use chrono_tz::Tz;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Timezone of the practitioner's wall clock. Bare local timestamps
    /// coming from storage are interpreted against it.
    pub timezone: Tz,
    /// Maximum number of occurrences a single weekly expansion may
    /// produce. This keeps a mistyped until-date from flooding the
    /// calendar with years of generated events.
    pub max_occurrences: usize,
}

impl Config {
    pub fn new() -> Self {
        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let timezone = match std::env::var("TIMEZONE") {
            Ok(timezone) => match timezone.parse::<Tz>() {
                Ok(timezone) => timezone,
                Err(_) => {
                    warn!(
                        "The given TIMEZONE: {} is not valid, falling back to UTC.",
                        timezone
                    );
                    chrono_tz::UTC
                }
            },
            Err(_) => {
                info!("Did not find TIMEZONE environment variable. Going to use UTC.");
                chrono_tz::UTC
            }
        };

        let default_max_occurrences = 365;
        let max_occurrences = std::env::var("MAX_OCCURRENCES")
            .ok()
            .and_then(|cap| match cap.parse::<usize>() {
                Ok(cap) if cap > 0 => Some(cap),
                _ => {
                    warn!(
                        "The given MAX_OCCURRENCES: {} is not valid, falling back to the default: {}.",
                        cap, default_max_occurrences
                    );
                    None
                }
            })
            .unwrap_or(default_max_occurrences);

        Self {
            port,
            timezone,
            max_occurrences,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
