//! Ordering of the hours column.

use crate::error::AnalysisError;
use crate::models::Ranking;

/// Sort in place, ascending, by repeatedly selecting the minimum.
///
/// Quadratic, but the input is one reactor's yearly history.
pub fn selection_sort<T: PartialOrd>(values: &mut [T]) {
    for i in 0..values.len() {
        let mut min = i;
        for j in (i + 1)..values.len() {
            if values[min] > values[j] {
                min = j;
            }
        }
        values.swap(i, min);
    }
}

/// Sort a copy of `hours` and take its extrema.
pub fn rank_hours(hours: &[u32]) -> Result<Ranking, AnalysisError> {
    let mut sorted_hours = hours.to_vec();
    selection_sort(&mut sorted_hours);

    match (sorted_hours.first(), sorted_hours.last()) {
        (Some(&lowest), Some(&highest)) => Ok(Ranking {
            lowest,
            highest,
            sorted_hours,
        }),
        _ => Err(AnalysisError::EmptyDataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_sort() {
        let mut values = vec![5, 3, 9, 1, 3, 7];
        selection_sort(&mut values);
        assert_eq!(values, vec![1, 3, 3, 5, 7, 9]);

        let mut single = vec![42];
        selection_sort(&mut single);
        assert_eq!(single, vec![42]);

        let mut empty: Vec<u32> = Vec::new();
        selection_sort(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_rank_hours() {
        let hours = vec![8400, 8760, 7900];
        let ranking = rank_hours(&hours).unwrap();

        assert_eq!(ranking.sorted_hours, vec![7900, 8400, 8760]);
        assert_eq!(ranking.lowest, 7900);
        assert_eq!(ranking.highest, 8760);
        // Input is left in row order.
        assert_eq!(hours, vec![8400, 8760, 7900]);
    }

    #[test]
    fn test_rank_matches_min_max() {
        let hours = vec![6541, 7892, 6977, 7455, 6102, 8004, 6102, 8760, 0];
        let ranking = rank_hours(&hours).unwrap();

        assert!(ranking.sorted_hours.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ranking.sorted_hours.len(), hours.len());
        assert_eq!(Some(&ranking.lowest), hours.iter().min());
        assert_eq!(Some(&ranking.highest), hours.iter().max());
    }

    #[test]
    fn test_rank_single_record() {
        let ranking = rank_hours(&[8000]).unwrap();
        assert_eq!(ranking.lowest, 8000);
        assert_eq!(ranking.highest, 8000);
    }

    #[test]
    fn test_rank_empty() {
        assert_eq!(rank_hours(&[]), Err(AnalysisError::EmptyDataset));
    }
}
