//! Code for working with the months of the year and the climatic seasons of the Indian
//! subcontinent.
//!
//! Rainfall, potential and demand are all handled at monthly resolution. Values for a whole year
//! are stored as [`Monthly`] arrays ordered January to December.
use strum::{Display, EnumIter, IntoEnumIterator};

/// One value per month, ordered January to December
pub type Monthly<T> = [T; 12];

/// All months in calendar order
pub const MONTHS: Monthly<Month> = [
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

/// A calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[allow(missing_docs)]
pub enum Month {
    #[strum(to_string = "Jan")]
    January,
    #[strum(to_string = "Feb")]
    February,
    #[strum(to_string = "Mar")]
    March,
    #[strum(to_string = "Apr")]
    April,
    #[strum(to_string = "May")]
    May,
    #[strum(to_string = "Jun")]
    June,
    #[strum(to_string = "Jul")]
    July,
    #[strum(to_string = "Aug")]
    August,
    #[strum(to_string = "Sep")]
    September,
    #[strum(to_string = "Oct")]
    October,
    #[strum(to_string = "Nov")]
    November,
    #[strum(to_string = "Dec")]
    December,
}

impl Month {
    /// Position of the month in the year, starting at zero for January
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of days in the month. February always has 28 days.
    pub fn days(self) -> u32 {
        match self {
            Self::February => 28,
            Self::April | Self::June | Self::September | Self::November => 30,
            _ => 31,
        }
    }

    /// The climatic season this month belongs to
    pub fn season(self) -> Season {
        match self.index() {
            2..=4 => Season::PreMonsoon,
            5..=8 => Season::Monsoon,
            9 | 10 => Season::PostMonsoon,
            _ => Season::Winter,
        }
    }

    /// Whether the month falls in the monsoon
    pub fn is_monsoon(self) -> bool {
        self.season() == Season::Monsoon
    }
}

/// A climatic season
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Season {
    /// March to May
    #[strum(to_string = "pre-monsoon")]
    PreMonsoon,
    /// June to September (the south-west monsoon)
    #[strum(to_string = "monsoon")]
    Monsoon,
    /// October and November
    #[strum(to_string = "post-monsoon")]
    PostMonsoon,
    /// December to February
    #[strum(to_string = "winter")]
    Winter,
}
