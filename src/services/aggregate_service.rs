use std::collections::BTreeMap;
use crate::models::{DailyPrice, MonthlySummary, YearMonth};

/// Collapse daily records into one row per calendar month.
///
/// Input order does not matter: within a month the earliest date supplies
/// `start_open` and the latest date supplies `end_open`. Months come out
/// ascending and only days actually present are considered.
pub fn summarize_monthly(prices: &[DailyPrice]) -> Vec<MonthlySummary> {
    // (earliest, latest) record per month
    let mut months: BTreeMap<YearMonth, (&DailyPrice, &DailyPrice)> = BTreeMap::new();

    for price in prices {
        months
            .entry(YearMonth::from(price.date))
            .and_modify(|(first, last)| {
                if price.date < first.date {
                    *first = price;
                }
                if price.date > last.date {
                    *last = price;
                }
            })
            .or_insert((price, price));
    }

    months
        .into_iter()
        .map(|(key, (first, last))| MonthlySummary {
            month: key.first_day(),
            start_open: first.open,
            end_open: last.open,
        })
        .collect()
}
