//! Daily content rotation.
//!
//! Maps a calendar date to the repeating 30-day cycle and assembles the
//! material (questions plus a deterministically picked image set) served for
//! that day. Quiz and agreement variants share this logic, so the mapping
//! must stay identical everywhere.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::content::{ContentDay, DayIndex, Question};
use super::picker;
use super::ports::ContentCatalogue;

/// Cumulative day counts at the start of each month, ignoring leap years.
///
/// The count is fixed (Jan 1 = 1, Dec 31 = 365 in every year). Leap days are
/// deliberately not accounted for: downstream content assignment depends on
/// this exact mapping, so it must not be "corrected" to a leap-aware
/// ordinal.
const MONTH_START_DAYS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// 1-based day-of-year using the fixed non-leap month table.
pub fn day_of_year(date: NaiveDate) -> u32 {
    MONTH_START_DAYS[date.month0() as usize] + date.day()
}

/// Cycle index for a calendar date, always in `1..=30`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tandem_backend::domain::daily::daily_index;
///
/// let jan_1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(daily_index(jan_1).get(), 2);
/// ```
pub fn daily_index(date: NaiveDate) -> DayIndex {
    DayIndex::from_day_of_year(day_of_year(date))
}

/// Everything a client needs to render one day of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyMaterial {
    date: NaiveDate,
    day: DayIndex,
    questions: Vec<Question>,
    images: Vec<String>,
}

impl DailyMaterial {
    /// Calendar date the material was assembled for.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Cycle day the date maps to.
    pub fn day(&self) -> DayIndex {
        self.day
    }

    /// Questions for the day.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Image paths picked for the day.
    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// Assembles daily material from the catalogue and a fixed image pool.
///
/// Constructed once at startup and shared by reference; holds no per-request
/// state.
#[derive(Clone)]
pub struct DailyContentService {
    catalogue: Arc<dyn ContentCatalogue>,
    image_pool: Vec<String>,
    images_per_day: usize,
}

impl DailyContentService {
    /// Build the service from an already-loaded catalogue and image pool.
    pub fn new(
        catalogue: Arc<dyn ContentCatalogue>,
        image_pool: Vec<String>,
        images_per_day: usize,
    ) -> Self {
        Self {
            catalogue,
            image_pool,
            images_per_day,
        }
    }

    /// Material for the given calendar date.
    ///
    /// The image selection is seeded with the ISO `YYYY-MM-DD` date string,
    /// so every render of the same day agrees on the same images.
    pub fn material_for(&self, date: NaiveDate) -> DailyMaterial {
        let day = daily_index(date);
        let entry: ContentDay = self.catalogue.content_for(day);
        let seed = date.format("%Y-%m-%d").to_string();
        let images = picker::pick(&self.image_pool, self.images_per_day, &seed);
        DailyMaterial {
            date,
            day,
            questions: entry.questions().to_vec(),
            images,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;
    use crate::domain::content::CYCLE_DAYS;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    #[case(date(2024, 1, 1), 2)] // day-of-year 1 -> (1 % 30) + 1
    #[case(date(2024, 1, 31), 2)] // day-of-year 31 -> (31 % 30) + 1
    #[case(date(2024, 1, 29), 30)]
    #[case(date(2024, 1, 30), 1)] // wraps from 30 back to 1
    #[case(date(2023, 12, 31), 6)] // non-leap count: 365 -> (365 % 30) + 1
    #[case(date(2024, 12, 31), 6)] // leap year uses the same fixed table
    fn maps_dates_onto_the_cycle(#[case] date: NaiveDate, #[case] expected: u32) {
        assert_eq!(daily_index(date).get(), expected);
    }

    #[rstest]
    fn march_first_ignores_leap_day() {
        // Fixed table: Mar 1 is day 60 in every year, even 2024.
        assert_eq!(day_of_year(date(2024, 3, 1)), 60);
        assert_eq!(day_of_year(date(2023, 3, 1)), 60);
    }

    #[rstest]
    fn index_stays_in_range_and_advances_daily_for_a_full_year() {
        let mut current = date(2024, 1, 1);
        let mut previous = daily_index(current).get();
        for _ in 0..365 {
            current = current.succ_opt().expect("next date");
            let index = daily_index(current).get();
            assert!((1..=CYCLE_DAYS).contains(&index));
            let expected = if previous == CYCLE_DAYS { 1 } else { previous + 1 };
            // Feb 29 maps to the same fixed ordinal as Mar 1, so the index
            // repeats once across the leap day instead of advancing.
            if current != date(2024, 3, 1) {
                assert_eq!(index, expected, "at {current}");
            }
            previous = index;
        }
    }

    mod service {
        use std::sync::Arc;

        use super::*;
        use crate::domain::ports::ContentCatalogue;

        struct SingleDayCatalogue(ContentDay);

        impl ContentCatalogue for SingleDayCatalogue {
            fn content_for(&self, _day: DayIndex) -> ContentDay {
                self.0.clone()
            }

            fn len(&self) -> usize {
                1
            }
        }

        fn service(images_per_day: usize) -> DailyContentService {
            let entry = ContentDay::new(
                DayIndex::new(1).expect("valid day"),
                vec![Question::new("What made you laugh today?").expect("valid question")],
            );
            let pool = (1..=8)
                .map(|i| format!("/images/daily/{i:02}.webp"))
                .collect();
            DailyContentService::new(Arc::new(SingleDayCatalogue(entry)), pool, images_per_day)
        }

        #[rstest]
        fn material_is_deterministic_per_date() {
            let service = service(3);
            let day = date(2024, 6, 1);
            assert_eq!(service.material_for(day), service.material_for(day));
        }

        #[rstest]
        fn material_carries_catalogue_questions_and_picked_images() {
            let service = service(3);
            let material = service.material_for(date(2024, 6, 1));
            assert_eq!(material.questions().len(), 1);
            assert_eq!(material.images().len(), 3);
            assert_eq!(material.day(), daily_index(date(2024, 6, 1)));
        }
    }
}
