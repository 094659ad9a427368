//! Passenger table loading and feature engineering.
//!
//! This crate holds the data half of the survival visualizer: the columnar
//! passenger table, the CSV loader that builds it, and the feature deriver
//! that enriches it before charting.
//!
//! # Workflow
//!
//! 1. **Load** ([`loader::load_csv`]): read the CSV file, infer column types
//! 2. **Derive** ([`features::derive_features`]): add `FamilySize`, `IsAlone`,
//!    `AgeGroup`, `Title`, `FareBin`; impute `Age` and `Embarked`
//! 3. **Query** ([`table::PassengerTable`]): typed column access for charts
//!
//! # Example
//!
//! ```
//! use titanic_analysis::{features, loader, table::names};
//!
//! let csv = "\
//! Pclass,Survived,Sex,Age,SibSp,Parch,Fare,Embarked,Name
//! 1,1,female,29,0,0,100,C,\"Smith, Mrs. Jane\"
//! 3,0,male,,1,0,7.25,S,\"Doe, Mr. John\"
//! ";
//! let mut table = loader::read_csv(csv.as_bytes())?;
//! features::derive_features(&mut table)?;
//!
//! assert_eq!(table.int_column(names::FAMILY_SIZE)?, &[Some(1), Some(2)]);
//! assert_eq!(table.float_column(names::AGE)?, &[Some(29.0), Some(29.0)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod column;
pub mod features;
pub mod loader;
pub mod table;
