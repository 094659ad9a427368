//! Statistical building blocks for the passenger survival visualizer.
//!
//! This crate provides the numeric routines the feature deriver and the charts
//! are built on:
//!
//! - **Descriptive statistics**: streaming mean and spread, median, and mode
//! - **Quantiles**: linear-interpolated quantiles of a dataset
//! - **Binning**: fixed-edge and equal-frequency (quantile) interval bins
//! - **Correlation**: Pearson correlation over pairwise-complete observations
//! - **Box summaries**: quartiles, whiskers, and outliers for box plots
//! - **Kernel density**: Gaussian KDE with Scott's bandwidth for violin plots
//!
//! # Modules
//!
//! - [`descriptive`]: Moments, median, and mode
//! - [`quantile`]: Interpolated quantiles and equal-frequency cut points
//! - [`binning`]: Interval binning (fixed edges and quantile edges)
//! - [`correlation`]: Correlation coefficients and matrices
//! - [`boxplot`]: Five-number summaries with Tukey whiskers
//! - [`kde`]: Gaussian kernel density estimation
//!
//! # Examples
//!
//! ## Central tendency
//!
//! ```
//! use titanic_stats::descriptive::{self, Moments};
//!
//! let ages = [22.0, 38.0, 26.0, 35.0];
//! let moments = ages.into_iter().collect::<Moments>();
//! assert!((moments.mean().unwrap() - 30.25).abs() < 1e-12);
//! assert_eq!(descriptive::median(&ages), Some(30.5));
//! ```
//!
//! ## Computing quantiles
//!
//! ```
//! use titanic_stats::quantile::compute_quantile;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! assert_eq!(compute_quantile(&values, 0.5), 3.0);
//! assert_eq!(compute_quantile(&values, 0.25), 2.0);
//! ```
//!
//! ## Binning into quartiles
//!
//! ```
//! use titanic_stats::binning::IntervalBins;
//!
//! let fares = [7.25, 8.05, 13.0, 26.0, 53.1, 71.3, 8.46, 21.07];
//! let bins = IntervalBins::from_quantiles(&fares, 4).unwrap();
//! assert_eq!(bins.assign(7.25), Some(0));
//! assert_eq!(bins.assign(71.3), Some(3));
//! ```

pub mod binning;
pub mod boxplot;
pub mod correlation;
pub mod descriptive;
pub mod kde;
pub mod quantile;
