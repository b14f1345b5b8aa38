use chrono::{Datelike, Month};
use serde::{Deserialize, Serialize};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Agro-climatic season of the Zimbabwean calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    /// November to March
    Rainy,
    /// April to July
    CoolDry,
    /// August to October
    HotDry,
}

impl Season {
    /// Evaluation order used wherever seasons are walked in sequence.
    pub const ALL: [Season; 3] = [Season::Rainy, Season::CoolDry, Season::HotDry];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Rainy => "Rainy",
            Season::CoolDry => "Cool Dry",
            Season::HotDry => "Hot Dry",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "rainy" => Some(Season::Rainy),
            "cooldry" => Some(Season::CoolDry),
            "hotdry" => Some(Season::HotDry),
            _ => None,
        }
    }

    pub fn from_month(month: Month) -> Self {
        match month {
            Month::November | Month::December | Month::January | Month::February | Month::March => {
                Season::Rainy
            }
            Month::April | Month::May | Month::June | Month::July => Season::CoolDry,
            Month::August | Month::September | Month::October => Season::HotDry,
        }
    }

    /// Recommended planting months, in the fixed order they are offered.
    pub fn planting_months(&self) -> &'static [Month] {
        match self {
            Season::Rainy => &[Month::November, Month::December, Month::January],
            Season::CoolDry => &[Month::April, Month::May],
            Season::HotDry => &[Month::August, Month::September],
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Calendar month of a date as a `chrono::Month`.
pub fn month_of(date: impl Datelike) -> Month {
    MONTHS[date.month0() as usize]
}

/// Season for the calendar month of `date`, in whatever calendar the caller
/// built the date in.
pub fn resolve_season(date: impl Datelike) -> Season {
    Season::from_month(month_of(date))
}
