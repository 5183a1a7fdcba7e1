use std::cmp::Ordering;

/// argmin returns the index of the minimum value in the array x. If the minimum occurs several
/// times, the first index is returned. Returns None for an empty array.
pub fn argmin<T: PartialOrd + Copy>(x: &[T]) -> Option<usize> {
    let mut iter = x.iter().enumerate();
    let (mut idx_min, &first) = iter.next()?;
    let mut val_min = first;

    for (i, &val) in iter {
        if val < val_min {
            val_min = val;
            idx_min = i;
        }
    }

    Some(idx_min)
}

#[derive(Debug, Clone, Copy)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// argsort returns the indices that would sort an array.
///
/// Equal values keep their original relative order, i.e. ties are broken by the lower index
/// first. This is part of the ranking contract of the simulator and does not rely on the
/// stability of the underlying sort. NaN values are ordered behind all numbers.
pub fn argsort(x: &[f64], order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..x.len()).collect();
    indices.sort_by(|&a, &b| {
        let by_value: Ordering = match order {
            SortOrder::Ascending => x[a].total_cmp(&x[b]),
            SortOrder::Descending => x[b].total_cmp(&x[a]),
        };
        by_value.then(a.cmp(&b))
    });
    indices
}

/// clamp_pct restricts a percentage value to [0.0, 100.0].
pub fn clamp_pct(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

fn to_millis(t: f64) -> u64 {
    if t.is_finite() && t > 0.0 {
        (t * 1000.0).round() as u64
    } else {
        0
    }
}

/// format_laptime formats a lap time in seconds as `M:SS.mmm`, e.g. 56.4306 -> `0:56.431`.
pub fn format_laptime(t: f64) -> String {
    let ms = to_millis(t);
    format!("{}:{:02}.{:03}", ms / 60_000, (ms % 60_000) / 1000, ms % 1000)
}

/// format_racetime formats a race time in seconds as `H:MM:SS.mmm`.
pub fn format_racetime(t: f64) -> String {
    let ms = to_millis(t);
    format!(
        "{}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        (ms % 3_600_000) / 60_000,
        (ms % 60_000) / 1000,
        ms % 1000
    )
}

/// format_gap formats a time gap to the leader, e.g. `+2.345` or `+1:02.345` for gaps above one
/// minute.
pub fn format_gap(delta_t: f64) -> String {
    let ms = to_millis(delta_t);
    if ms < 60_000 {
        format!("+{}.{:03}", ms / 1000, ms % 1000)
    } else {
        format!("+{}", format_laptime(delta_t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmin_returns_first_minimum() {
        assert_eq!(argmin(&[3.0, 1.0, 2.0, 1.0]), Some(1));
        assert_eq!(argmin::<f64>(&[]), None);
    }

    #[test]
    fn argsort_breaks_ties_by_index() {
        let x = [2.0, 1.0, 2.0, 1.0, 0.5];
        assert_eq!(argsort(&x, SortOrder::Ascending), vec![4, 1, 3, 0, 2]);
        assert_eq!(argsort(&x, SortOrder::Descending), vec![0, 2, 1, 3, 4]);
    }

    #[test]
    fn argsort_puts_nan_last() {
        let x = [f64::NAN, 1.0, f64::NAN];
        assert_eq!(argsort(&x, SortOrder::Ascending), vec![1, 0, 2]);
    }

    #[test]
    fn laptime_format() {
        assert_eq!(format_laptime(56.4306), "0:56.431");
        assert_eq!(format_laptime(85.432), "1:25.432");
        assert_eq!(format_laptime(59.9996), "1:00.000");
    }

    #[test]
    fn racetime_and_gap_format() {
        assert_eq!(format_racetime(6323.456), "1:45:23.456");
        assert_eq!(format_gap(2.345), "+2.345");
        assert_eq!(format_gap(62.345), "+1:02.345");
    }

    #[test]
    fn pct_clamping() {
        assert_eq!(clamp_pct(-3.0), 0.0);
        assert_eq!(clamp_pct(42.0), 42.0);
        assert_eq!(clamp_pct(130.0), 100.0);
    }
}
