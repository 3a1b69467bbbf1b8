pub struct StatsHelper;

impl StatsHelper {
    /// Median of the finite values; `None` when there are none.
    /// Even-length input yields the mean of the two central values.
    pub fn median(samples: &[f64]) -> Option<f64> {
        let mut values: Vec<f64> = samples
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);
        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            Some(values[mid])
        } else {
            Some((values[mid - 1] + values[mid]) / 2.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_empty_sequence_is_none() {
        assert_eq!(StatsHelper::median(&[]), None);
        assert_eq!(StatsHelper::median(&[f64::NAN]), None);
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(StatsHelper::median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(StatsHelper::median(&[2.0, 1.0]), Some(1.5));
        assert_eq!(StatsHelper::median(&[4.0, 4.0]), Some(4.0));
    }

    #[test]
    fn median_skips_nan() {
        assert_eq!(StatsHelper::median(&[f64::NAN, 5.0, 1.0, 3.0]), Some(3.0));
    }
}
