//! Derived passenger features and missing-value imputation.
//!
//! [`derive_features`] enriches a loaded [`PassengerTable`] in place:
//!
//! | Column | Definition |
//! |---|---|
//! | `FamilySize` | `SibSp + Parch + 1`, integral unless either input has fractional values |
//! | `IsAlone` | `1` if `FamilySize == 1`, else `0` |
//! | `AgeGroup` | Age bucketed into (0,12], (12,18], (18,30], (30,50], (50,100] |
//! | `Title` | first run of letters after a space in `Name` |
//! | `FareBin` | Fare quartile: Low, Medium, High, Very High |
//!
//! Afterwards missing `Age` values are filled with the median age, and missing
//! `Embarked` values with the most frequent port.
//!
//! `AgeGroup` is computed from the ages as loaded, before imputation. Rows
//! whose age was missing keep a missing `AgeGroup` even though their `Age` is
//! filled in afterwards.

use std::fmt;

use titanic_stats::{
    binning::{BinningError, IntervalBins},
    descriptive,
};

use crate::{
    column::{CategoricalColumn, Column},
    table::{PassengerTable, TableError, names},
};

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum DeriveError {
    #[display("cannot derive features: {_0}")]
    #[from]
    Table(TableError),
    #[display("cannot bin column '{column}'")]
    Binning {
        column: String,
        source: BinningError,
    },
}

/// Age bracket of a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Child,
    Teen,
    YoungAdult,
    Adult,
    Elderly,
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

impl AgeGroup {
    pub const ALL: [Self; 5] = [
        Self::Child,
        Self::Teen,
        Self::YoungAdult,
        Self::Adult,
        Self::Elderly,
    ];

    /// Inclusive upper bound of each bracket; the lower bound of the first one
    /// (0) is exclusive.
    pub const UPPER_BOUNDS: [f64; 5] = [12.0, 18.0, 30.0, 50.0, 100.0];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Child => "Child",
            Self::Teen => "Teen",
            Self::YoungAdult => "Young Adult",
            Self::Adult => "Adult",
            Self::Elderly => "Elderly",
        }
    }

    /// Buckets an age. Ages outside (0, 100] and NaN have no group.
    ///
    /// ```
    /// use titanic_analysis::features::AgeGroup;
    ///
    /// assert_eq!(AgeGroup::from_age(12.0), Some(AgeGroup::Child));
    /// assert_eq!(AgeGroup::from_age(18.5), Some(AgeGroup::YoungAdult));
    /// assert_eq!(AgeGroup::from_age(0.0), None);
    /// ```
    #[must_use]
    pub fn from_age(age: f64) -> Option<Self> {
        if age.is_nan() || age <= 0.0 {
            return None;
        }
        Self::UPPER_BOUNDS
            .iter()
            .position(|&upper| age <= upper)
            .map(|index| Self::ALL[index])
    }
}

/// Fare quartile of a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FareBin {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl fmt::Display for FareBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.label(), f)
    }
}

impl FareBin {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::VeryHigh];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

/// Quartile edges computed from an observed fare distribution.
#[derive(Debug, Clone)]
pub struct FareBins {
    bins: IntervalBins,
}

impl FareBins {
    /// Computes quartile edges over the present fares.
    pub fn from_fares(fares: &[Option<f64>]) -> Result<Self, BinningError> {
        let observed = fares.iter().flatten().copied().collect::<Vec<_>>();
        let bins = IntervalBins::from_quantiles(&observed, FareBin::ALL.len())?;
        log::debug!("Fare quartile edges: {:?}", bins.edges());
        Ok(Self { bins })
    }

    #[must_use]
    pub fn edges(&self) -> &[f64] {
        self.bins.edges()
    }

    #[must_use]
    pub fn assign(&self, fare: f64) -> Option<FareBin> {
        self.bins.assign(fare).map(|index| FareBin::ALL[index])
    }
}

/// `SibSp + Parch + 1`, or `None` if the sum overflows.
///
/// ```
/// use titanic_analysis::features::family_size;
///
/// assert_eq!(family_size(1, 0), Some(2));
/// assert_eq!(family_size(i64::MAX, 0), None);
/// ```
#[must_use]
pub fn family_size(siblings_spouses: i64, parents_children: i64) -> Option<i64> {
    siblings_spouses
        .checked_add(parents_children)?
        .checked_add(1)
}

/// `1` if the passenger travels without family, `0` otherwise (including
/// an unknown family size).
#[must_use]
pub fn is_alone(family_size: Option<f64>) -> i64 {
    i64::from(family_size == Some(1.0))
}

/// Family sizes as integers when both counts are integer columns, otherwise
/// as exact float sums.
fn family_size_column(table: &PassengerTable) -> Result<Column, TableError> {
    let siblings_spouses = table.column(names::SIBLINGS_SPOUSES)?;
    let parents_children = table.column(names::PARENTS_CHILDREN)?;
    if let (Column::Int(s), Column::Int(p)) = (siblings_spouses, parents_children) {
        let sizes = s
            .iter()
            .zip(p)
            .map(|(s, p)| family_size((*s)?, (*p)?))
            .collect();
        return Ok(Column::Int(sizes));
    }
    let s = table.numeric_column(names::SIBLINGS_SPOUSES)?;
    let p = table.numeric_column(names::PARENTS_CHILDREN)?;
    let sizes = s
        .iter()
        .zip(&p)
        .map(|(s, p)| Some((*s)? + (*p)? + 1.0))
        .collect();
    Ok(Column::Float(sizes))
}

/// Extracts the honorific from a passenger name.
///
/// Returns the first run of ASCII letters that directly follows a space.
///
/// ```
/// use titanic_analysis::features::extract_title;
///
/// assert_eq!(extract_title("Braund, Mr. Owen Harris"), Some("Mr"));
/// assert_eq!(extract_title("Lee, Master. Tom"), Some("Master"));
/// assert_eq!(extract_title("Nobody"), None);
/// ```
#[must_use]
pub fn extract_title(name: &str) -> Option<&str> {
    name.match_indices(' ').find_map(|(space, _)| {
        let rest = &name[space + 1..];
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        (len > 0).then(|| &rest[..len])
    })
}

/// Fills missing values with the median of the present ones.
///
/// Returns the fill value, or `None` (leaving `values` untouched) when no value
/// is present.
pub fn impute_median(values: &mut [Option<f64>]) -> Option<f64> {
    let observed = values.iter().flatten().copied().collect::<Vec<_>>();
    let median = descriptive::median(&observed)?;
    for value in values.iter_mut().filter(|v| v.is_none()) {
        *value = Some(median);
    }
    Some(median)
}

/// Fills missing values with the most frequent present value.
///
/// Ties go to the lexicographically smallest value. Returns the fill value, or
/// `None` (leaving `values` untouched) when no value is present.
pub fn impute_mode(values: &mut [Option<String>]) -> Option<String> {
    let mode = descriptive::mode(values.iter().flatten())?.clone();
    for value in values.iter_mut().filter(|v| v.is_none()) {
        *value = Some(mode.clone());
    }
    Some(mode)
}

/// Adds the derived columns to `table` and imputes `Age` and `Embarked`.
///
/// All inputs are validated before the table is modified, so on error the
/// table is left unchanged.
pub fn derive_features(table: &mut PassengerTable) -> Result<(), DeriveError> {
    let family_sizes = family_size_column(table)?;
    let ages = table.numeric_column(names::AGE)?;
    let fares = table.numeric_column(names::FARE)?;
    let passenger_names = table.text_values(names::NAME)?;
    table.text_values(names::EMBARKED)?;

    let alone = family_sizes
        .to_f64()
        .unwrap_or_default()
        .into_iter()
        .map(|size| Some(is_alone(size)))
        .collect();
    let age_groups = ages
        .iter()
        .map(|age| age.and_then(AgeGroup::from_age).map(|g| g as usize))
        .collect();
    let titles = passenger_names
        .iter()
        .map(|name| name.as_deref().and_then(extract_title).map(str::to_owned))
        .collect();
    let fare_bins = FareBins::from_fares(&fares).map_err(|source| DeriveError::Binning {
        column: names::FARE.to_owned(),
        source,
    })?;
    let fare_codes = fares
        .iter()
        .map(|fare| fare.and_then(|f| fare_bins.assign(f)).map(|b| b as usize))
        .collect();

    table.insert_column(names::FAMILY_SIZE, family_sizes)?;
    table.insert_column(names::IS_ALONE, Column::Int(alone))?;
    table.insert_column(
        names::AGE_GROUP,
        Column::Category(CategoricalColumn::new(
            labels(AgeGroup::ALL.map(AgeGroup::label)),
            age_groups,
        )),
    )?;
    table.insert_column(names::TITLE, Column::Text(titles))?;
    table.insert_column(
        names::FARE_BIN,
        Column::Category(CategoricalColumn::new(
            labels(FareBin::ALL.map(FareBin::label)),
            fare_codes,
        )),
    )?;

    match impute_median(table.float_column_mut(names::AGE)?) {
        Some(median) => log::debug!("Filled missing ages with median {median}"),
        None => log::warn!("No ages observed; Age left unimputed"),
    }
    match impute_mode(table.text_column_mut(names::EMBARKED)?) {
        Some(port) => log::debug!("Filled missing embarkation ports with '{port}'"),
        None => log::warn!("No embarkation ports observed; Embarked left unimputed"),
    }

    log::info!("Data preparation complete");
    Ok(())
}

fn labels<const N: usize>(labels: [&str; N]) -> Vec<String> {
    labels.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_csv;

    const THREE_PASSENGERS: &str = "\
Pclass,Survived,Sex,Age,SibSp,Parch,Fare,Embarked,Name
1,1,female,29,0,0,100,C,\"Smith, Mrs. Jane\"
3,0,male,22,1,0,7.25,S,\"Doe, Mr. John\"
2,1,male,10,0,1,15,Q,\"Lee, Master. Tom\"
";

    const WITH_GAPS: &str = "\
Pclass,Survived,Sex,Age,SibSp,Parch,Fare,Embarked,Name
3,0,male,22,1,0,7.25,S,\"Braund, Mr. Owen Harris\"
1,1,female,38,1,0,71.2833,C,\"Cumings, Mrs. John Bradley\"
3,1,female,,0,0,7.925,,\"Heikkinen, Miss. Laina\"
1,1,female,35,1,0,53.1,S,\"Futrelle, Mrs. Jacques Heath\"
3,0,male,,0,0,8.05,S,\"Allen, Mr. William Henry\"
3,0,male,54,0,0,51.8625,,\"McCarthy, Mr. Timothy J\"
";

    #[test]
    fn test_three_passenger_example() {
        let mut table = read_csv(THREE_PASSENGERS.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();

        assert_eq!(
            table.int_column(names::FAMILY_SIZE).unwrap(),
            &[Some(1), Some(2), Some(2)]
        );
        assert_eq!(
            table.int_column(names::IS_ALONE).unwrap(),
            &[Some(1), Some(0), Some(0)]
        );
        assert_eq!(
            table.text_column(names::TITLE).unwrap(),
            &[Some("Mrs".into()), Some("Mr".into()), Some("Master".into())]
        );
        let groups = table.category_column(names::AGE_GROUP).unwrap();
        assert_eq!(
            groups.iter().collect::<Vec<_>>(),
            vec![Some("Young Adult"), Some("Young Adult"), Some("Child")]
        );
        let fare_bins = table.category_column(names::FARE_BIN).unwrap();
        assert_eq!(
            fare_bins.iter().collect::<Vec<_>>(),
            vec![Some("Very High"), Some("Low"), Some("Medium")]
        );
    }

    #[test]
    fn test_family_size_and_is_alone_invariants() {
        for sibsp in 0..5_u8 {
            for parch in 0..5_u8 {
                let size = family_size(sibsp.into(), parch.into()).unwrap();
                assert_eq!(size, i64::from(sibsp + parch + 1));
                assert!(size >= 1);
                let as_float = f64::from(sibsp + parch + 1);
                assert_eq!(is_alone(Some(as_float)) == 1, size == 1);
            }
        }
        assert_eq!(is_alone(None), 0);
    }

    #[test]
    fn test_age_group_boundaries() {
        let cases = [
            (0.42, Some(AgeGroup::Child)),
            (12.0, Some(AgeGroup::Child)),
            (12.5, Some(AgeGroup::Teen)),
            (18.0, Some(AgeGroup::Teen)),
            (30.0, Some(AgeGroup::YoungAdult)),
            (30.5, Some(AgeGroup::Adult)),
            (50.0, Some(AgeGroup::Adult)),
            (80.0, Some(AgeGroup::Elderly)),
            (100.0, Some(AgeGroup::Elderly)),
            (100.1, None),
            (0.0, None),
            (-3.0, None),
            (f64::NAN, None),
        ];
        for (age, expected) in cases {
            assert_eq!(AgeGroup::from_age(age), expected, "age {age}");
        }
    }

    #[test]
    fn test_title_extraction_edge_cases() {
        assert_eq!(extract_title("Rothes, the Countess. of (Lucy)"), Some("the"));
        assert_eq!(extract_title("Simonius-Blumer, Col. Oberst Alfons"), Some("Col"));
        assert_eq!(extract_title("Odd,  Mr. Double"), Some("Mr"));
        assert_eq!(extract_title("Trailing "), None);
        assert_eq!(extract_title(" 123"), None);
    }

    #[test]
    fn test_imputation_uses_observed_values() {
        let mut table = read_csv(WITH_GAPS.as_bytes()).unwrap();
        let observed = table
            .numeric_column(names::AGE)
            .unwrap()
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        let expected_median = descriptive::median(&observed).unwrap();
        assert!((expected_median - 36.5).abs() < 1e-12);

        derive_features(&mut table).unwrap();

        let ages = table.float_column(names::AGE).unwrap();
        assert!(ages.iter().all(Option::is_some));
        assert_eq!(ages[2], Some(expected_median));
        assert_eq!(ages[4], Some(expected_median));

        let ports = table.text_column(names::EMBARKED).unwrap();
        assert!(ports.iter().all(Option::is_some));
        assert_eq!(ports[2].as_deref(), Some("S"));
        assert_eq!(ports[5].as_deref(), Some("S"));
    }

    #[test]
    fn test_age_group_uses_pre_imputation_age() {
        let mut table = read_csv(WITH_GAPS.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();
        let groups = table.category_column(names::AGE_GROUP).unwrap();
        assert_eq!(groups.label_at(2), None);
        assert_eq!(groups.label_at(4), None);
        assert_eq!(groups.label_at(5), Some("Elderly"));
    }

    #[test]
    fn test_fare_bins_are_balanced() {
        let fares = (0..23_u32)
            .map(|i| Some(5.0 + f64::from(i * i) * 0.75))
            .collect::<Vec<_>>();
        let bins = FareBins::from_fares(&fares).unwrap();
        let mut counts = [0_usize; 4];
        for fare in fares.iter().flatten() {
            counts[bins.assign(*fare).unwrap() as usize] += 1;
        }
        for count in counts {
            assert!(count > 0);
            #[expect(clippy::cast_precision_loss)]
            let diff = (count as f64 - 23.0 / 4.0).abs();
            assert!(diff <= 1.0, "{counts:?}");
        }
    }

    #[test]
    fn test_tied_fare_quartiles_fail() {
        let csv = "Name,Age,SibSp,Parch,Fare,Embarked\n\
\"A, Mr. B\",30,0,0,8.05,S\n\
\"C, Mr. D\",31,0,0,8.05,S\n\
\"E, Mr. F\",32,0,0,8.05,S\n\
\"G, Mr. H\",33,0,0,8.05,S\n\
\"I, Mrs. J\",34,0,0,80,C\n";
        let mut table = read_csv(csv.as_bytes()).unwrap();
        let before = table.clone();
        let err = derive_features(&mut table).unwrap_err();
        assert!(matches!(
            err,
            DeriveError::Binning {
                source: BinningError::NonIncreasingEdges { .. },
                ..
            }
        ));
        assert_eq!(table, before);
    }

    #[test]
    fn test_mode_tie_break_is_smallest() {
        let mut ports = vec![
            Some("S".to_owned()),
            Some("C".to_owned()),
            None,
            Some("C".to_owned()),
            Some("S".to_owned()),
        ];
        assert_eq!(impute_mode(&mut ports).as_deref(), Some("C"));
        assert_eq!(ports[2].as_deref(), Some("C"));
    }

    #[test]
    fn test_imputation_without_observations() {
        let mut ages = vec![None, None];
        assert_eq!(impute_median(&mut ages), None);
        assert_eq!(ages, vec![None, None]);
    }

    #[test]
    fn test_imputation_without_observed_ports() {
        let csv = "Name,Age,SibSp,Parch,Fare,Embarked\n\
\"A, Mr. B\",30,0,0,7.25,\n\
\"C, Mrs. D\",40,1,0,20,\n\
\"E, Miss. F\",5,0,2,35,\n\
\"G, Mr. H\",60,0,0,80,\n";
        let mut table = read_csv(csv.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();
        assert_eq!(
            table.text_column(names::EMBARKED).unwrap(),
            &[None, None, None, None]
        );
        assert_eq!(
            table.text_column(names::TITLE).unwrap()[1].as_deref(),
            Some("Mrs")
        );
    }

    #[test]
    fn test_names_without_values_yield_no_titles() {
        let csv = "Name,Age,SibSp,Parch,Fare,Embarked\n,30,0,0,7.25,S\n,40,1,0,20,C\n,5,0,2,35,Q\n,60,0,0,80,S\n";
        let mut table = read_csv(csv.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();
        assert_eq!(
            table.text_column(names::TITLE).unwrap(),
            &[None, None, None, None]
        );
    }

    #[test]
    fn test_fractional_counts_sum_exactly() {
        let csv = "Name,Age,SibSp,Parch,Fare,Embarked\n\
\"A, Mr. B\",30,1.5,0,7.25,S\n\
\"C, Mrs. D\",40,0,0,20,C\n\
\"E, Miss. F\",5,0,2,35,Q\n\
\"G, Mr. H\",60,,0,80,S\n";
        let mut table = read_csv(csv.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();
        assert_eq!(
            table.float_column(names::FAMILY_SIZE).unwrap(),
            &[Some(2.5), Some(1.0), Some(3.0), None]
        );
        assert_eq!(
            table.int_column(names::IS_ALONE).unwrap(),
            &[Some(0), Some(1), Some(0), Some(0)]
        );
    }

    #[test]
    fn test_overflowing_counts_leave_family_size_missing() {
        let csv = format!(
            "Name,Age,SibSp,Parch,Fare,Embarked\n\
\"A, Mr. B\",30,{},1,7.25,S\n\
\"C, Mrs. D\",40,1,0,20,C\n\
\"E, Miss. F\",5,0,2,35,Q\n\
\"G, Mr. H\",60,0,0,80,S\n",
            i64::MAX
        );
        let mut table = read_csv(csv.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();
        assert_eq!(
            table.int_column(names::FAMILY_SIZE).unwrap(),
            &[None, Some(2), Some(3), Some(1)]
        );
        assert_eq!(table.int_column(names::IS_ALONE).unwrap()[0], Some(0));
    }

    #[test]
    fn test_missing_column_leaves_table_unchanged() {
        let mut table = read_csv("Age,SibSp,Parch,Fare,Embarked\n22,1,0,7.25,S\n".as_bytes())
            .unwrap();
        let before = table.clone();
        let err = derive_features(&mut table).unwrap_err();
        assert!(matches!(
            err,
            DeriveError::Table(TableError::MissingColumn { ref name }) if name == "Name"
        ));
        assert_eq!(table, before);
    }

    #[test]
    fn test_missing_sibsp_propagates() {
        let csv = "Name,Age,SibSp,Parch,Fare,Embarked\n\"A, Mr. B\",30,,0,10,S\n\"C, Mrs. D\",40,1,0,20,C\n\"E, Miss. F\",5,0,2,30,Q\n\"G, Mr. H\",60,0,0,40,S\n";
        let mut table = read_csv(csv.as_bytes()).unwrap();
        derive_features(&mut table).unwrap();
        assert_eq!(
            table.int_column(names::FAMILY_SIZE).unwrap(),
            &[None, Some(2), Some(3), Some(1)]
        );
        assert_eq!(
            table.int_column(names::IS_ALONE).unwrap(),
            &[Some(0), Some(0), Some(0), Some(1)]
        );
    }
}
